use serde::{Deserialize, Serialize};

/// An identifier value qualified by the scheme it belongs to
/// (UBL `schemeID` attribute + element text).
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SchemedId {
    /// Scheme identifier, e.g. "UN/ECE 5153" or "0088".
    pub scheme: Option<String>,
    /// Identifier value.
    pub value: String,
}

impl SchemedId {
    /// Identifier without a scheme.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            scheme: None,
            value: value.into(),
        }
    }

    /// Identifier qualified by `scheme`.
    pub fn with_scheme(scheme: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.into()),
            value: value.into(),
        }
    }

    /// Scheme as string slice, if any.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// True if the value is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl std::fmt::Display for SchemedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}:{}", scheme, self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// Identifies one tax category of one tax scheme across a document,
/// e.g. (`UN/ECE 5153:VAT`, `UN/ECE 5305:S`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaxCategoryKey {
    pub scheme: SchemedId,
    pub category: SchemedId,
}

impl TaxCategoryKey {
    pub fn new(scheme: SchemedId, category: SchemedId) -> Self {
        Self { scheme, category }
    }
}

impl std::fmt::Display for TaxCategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.scheme, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn scheme_is_part_of_identity() {
        assert_ne!(
            SchemedId::with_scheme("UN/ECE 5305", "S"),
            SchemedId::new("S")
        );
        assert_eq!(
            SchemedId::with_scheme("UN/ECE 5305", "S"),
            SchemedId::with_scheme("UN/ECE 5305", "S")
        );
    }

    #[test]
    fn keys_work_as_map_keys() {
        let key = |cat: &str| {
            TaxCategoryKey::new(
                SchemedId::with_scheme("UN/ECE 5153", "VAT"),
                SchemedId::with_scheme("UN/ECE 5305", cat),
            )
        };
        let mut map = HashMap::new();
        map.insert(key("S"), 20);
        map.insert(key("AA"), 10);
        map.insert(key("S"), 19);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&key("S")], 19);
    }

    #[test]
    fn display() {
        let key = TaxCategoryKey::new(SchemedId::new("VAT"), SchemedId::with_scheme("X", "S"));
        assert_eq!(key.to_string(), "VAT/X:S");
    }

    #[test]
    fn blank_detection() {
        assert!(SchemedId::new("  ").is_blank());
        assert!(!SchemedId::new("0088").is_blank());
    }
}
