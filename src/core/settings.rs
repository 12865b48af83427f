use serde::{Deserialize, Serialize};

#[cfg(feature = "json")]
use super::error::ConversionError;

/// Per-call conversion configuration.
///
/// Everything that influences a conversion besides the document and the
/// code lists lives here; there is no process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Locale the caller will render diagnostics in (e.g. "en").
    pub diagnostics_locale: String,
    /// Locale for generated content such as country names (e.g. "de").
    pub content_locale: String,
    /// Enables the additional mandatory-field checks of the
    /// Austrian federal e-invoicing portal (biller VAT id, delivery,
    /// payment method).
    pub strict: bool,
    /// Value of the `GeneratingSystem` attribute.
    pub generating_system: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            diagnostics_locale: "en".to_string(),
            content_locale: "de".to_string(),
            strict: false,
            generating_system: format!("ebconvert {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConversionSettings {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn diagnostics_locale(mut self, locale: impl Into<String>) -> Self {
        self.diagnostics_locale = locale.into();
        self
    }

    pub fn content_locale(mut self, locale: impl Into<String>) -> Self {
        self.content_locale = locale.into();
        self
    }

    pub fn generating_system(mut self, name: impl Into<String>) -> Self {
        self.generating_system = name.into();
        self
    }

    /// Load settings from JSON. Missing keys take their defaults.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::Config(e.to_string()))
    }
}
