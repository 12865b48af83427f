//! UBL → ebInterface conversion engine.
//!
//! [`Converter`] is one assembler for all target versions, parameterised
//! by the version's [`VersionProfile`](crate::ebinterface::VersionProfile),
//! the injected [`CodeLists`] and the per-call [`ConversionSettings`].
//!
//! A conversion either aborts at the consistency check (`Ok(None)`) or
//! always completes with a document. Errors found after the check are
//! recorded in the diagnostics but do not stop assembly, so callers must
//! inspect [`Diagnostics::most_severe`] before using the result.

mod assemble;
mod delivery;
mod lines;
mod party;
mod payment;
mod precheck;
mod reductions;
mod tax;

pub use precheck::check_consistency;
pub use reductions::{SignNormalized, normalize_allowance_charges};
pub use tax::{TaxPercentageMap, resolve_percentage};

use crate::core::{
    CodeLists, ConversionError, ConversionSettings, DiagnosticCode, Diagnostics,
    StandardCodeLists,
};
use crate::ebinterface::{EbInvoice, EbVersion, VersionProfile};
use crate::ubl::{DocumentKind, UblDocument};

/// Maximum length of order ids in the target document.
pub const ORDER_REFERENCE_MAX_LENGTH: usize = 34;
/// Maximum length of an IBAN.
pub const IBAN_MAX_LENGTH: usize = 34;
/// Maximum length of a payment reference.
pub const PAYMENT_REFERENCE_MAX_LENGTH: usize = 35;

/// Converts UBL documents to one ebInterface version.
///
/// Holds only shared, read-only state and can be used from several
/// threads at once; every call gets its own [`Diagnostics`].
pub struct Converter<'a> {
    profile: VersionProfile,
    code_lists: &'a dyn CodeLists,
    settings: ConversionSettings,
}

impl<'a> Converter<'a> {
    pub fn new(version: EbVersion, code_lists: &'a dyn CodeLists) -> Self {
        Self {
            profile: version.profile(),
            code_lists,
            settings: ConversionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ConversionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn version(&self) -> EbVersion {
        self.profile.version
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Convert `doc`, recording findings in `diagnostics`.
    ///
    /// Returns `Ok(None)` when the consistency check found an error and
    /// [`ConversionError::DiagnosticsNotEmpty`] when `diagnostics` is not
    /// fresh.
    pub fn convert(
        &self,
        doc: &UblDocument,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<EbInvoice>, ConversionError> {
        if !diagnostics.is_empty() {
            return Err(ConversionError::DiagnosticsNotEmpty(diagnostics.len()));
        }

        tracing::debug!(
            version = self.profile.version.as_str(),
            kind = doc.kind.root_element(),
            number = doc.id.as_deref().unwrap_or(""),
            "converting document"
        );

        check_consistency(doc, self.code_lists, diagnostics);
        if diagnostics.has_errors() {
            tracing::warn!(
                errors = diagnostics.errors().count(),
                "consistency check failed, conversion aborted"
            );
            return Ok(None);
        }

        let mut ctx = Context {
            profile: self.profile,
            code_lists: self.code_lists,
            settings: &self.settings,
            kind: doc.kind,
            diagnostics,
        };
        let invoice = assemble::assemble(&mut ctx, doc);

        tracing::debug!(
            errors = ctx.diagnostics.errors().count(),
            warnings = ctx.diagnostics.warnings().count(),
            lines = invoice.details.items.len(),
            "conversion finished"
        );
        Ok(Some(invoice))
    }
}

/// Convert with the built-in code lists.
pub fn convert(
    doc: &UblDocument,
    version: EbVersion,
    settings: &ConversionSettings,
    diagnostics: &mut Diagnostics,
) -> Result<Option<EbInvoice>, ConversionError> {
    Converter::new(version, &StandardCodeLists)
        .with_settings(settings.clone())
        .convert(doc, diagnostics)
}

/// State shared by the conversion steps of one call.
pub(crate) struct Context<'c> {
    pub(crate) profile: VersionProfile,
    pub(crate) code_lists: &'c dyn CodeLists,
    pub(crate) settings: &'c ConversionSettings,
    pub(crate) kind: DocumentKind,
    pub(crate) diagnostics: &'c mut Diagnostics,
}

impl Context<'_> {
    /// Field path below the document root.
    pub(crate) fn path(&self, rest: &str) -> String {
        format!("{}/{}", self.kind.root_element(), rest)
    }

    pub(crate) fn warn(&mut self, field: impl Into<String>, code: DiagnosticCode, args: Vec<String>) {
        self.diagnostics.warn(field, code, args);
    }

    pub(crate) fn error(&mut self, field: impl Into<String>, code: DiagnosticCode, args: Vec<String>) {
        self.diagnostics.error(field, code, args);
    }

    /// Cut `value` to `limit` characters, warning when anything was cut.
    pub(crate) fn truncate(
        &mut self,
        field: impl Into<String>,
        code: DiagnosticCode,
        value: &str,
        limit: usize,
    ) -> String {
        if value.chars().count() <= limit {
            return value.to_string();
        }
        let cut: String = value.chars().take(limit).collect();
        self.warn(
            field,
            code,
            vec![value.to_string(), limit.to_string(), cut.clone()],
        );
        cut
    }
}

/// Trimmed, non-empty text.
pub(crate) fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Join the non-blank parts with `sep`; `None` if nothing is left.
pub(crate) fn join_non_blank<'s>(
    parts: impl IntoIterator<Item = &'s String>,
    sep: &str,
) -> Option<String> {
    let parts: Vec<&str> = parts
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(sep))
    }
}
