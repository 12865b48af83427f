//! Code-list lookups used by the converter.
//!
//! Every lookup goes through the [`CodeLists`] trait so callers can swap
//! in the exact list membership of the ebInterface version they target.

use serde::{Deserialize, Serialize};

use super::{countries, currencies, units};

/// Kind of a tax scheme id within a UN/ECE 5153 list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxSchemeKind {
    /// Value added tax, mapped to VAT items.
    Vat,
    /// Any other duty or tax, mapped to "other tax" entries.
    Other,
}

/// Read-only code-list registries.
pub trait CodeLists: Send + Sync {
    /// Business process (UBL `ProfileID`) is supported.
    fn is_known_process_id(&self, id: &str) -> bool;

    /// ISO 3166-1 alpha-2 country code is valid.
    fn is_known_country(&self, code: &str) -> bool;

    /// Human-readable country name for the content locale.
    fn country_name(&self, code: &str, locale: &str) -> Option<String>;

    /// ISO 4217 currency code is valid.
    fn is_known_currency(&self, code: &str) -> bool;

    /// UN/ECE Rec 20 unit code is valid.
    fn is_known_unit(&self, code: &str) -> bool;

    /// Scheme-of-schemes (`TaxScheme/ID/@schemeID`) is recognized.
    /// `None` means the attribute was absent.
    fn is_known_tax_scheme_list(&self, scheme_list: Option<&str>) -> bool;

    /// Classify a tax scheme id (`TaxScheme/ID`) of a recognized list.
    fn tax_scheme(&self, id: &str) -> TaxSchemeKind;
}

/// UN/ECE 5153 tax scheme list identifiers.
pub const TAX_SCHEME_LISTS: &[&str] = &["UN/ECE 5153", "UN/ECE 5153 Subset"];

/// Tax scheme id for value added tax.
pub const VAT_SCHEME_ID: &str = "VAT";

/// Business process identifiers accepted in `ProfileID`.
static PROCESS_IDS: &[&str] = &[
    "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0",
    "urn:www.cenbii.eu:profile:bii04:ver1.0",
    "urn:www.cenbii.eu:profile:bii04:ver2.0",
    "urn:www.cenbii.eu:profile:bii05:ver1.0",
    "urn:www.cenbii.eu:profile:bii05:ver2.0",
    "urn:www.cenbii.eu:profile:bii06:ver1.0",
    "urn:www.cenbii.eu:profile:bii06:ver2.0",
    "urn:www.cenbii.eu:profile:biixx:ver2.0",
];

/// Built-in code lists shared by all supported ebInterface versions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodeLists;

impl CodeLists for StandardCodeLists {
    fn is_known_process_id(&self, id: &str) -> bool {
        PROCESS_IDS.contains(&id.trim())
    }

    fn is_known_country(&self, code: &str) -> bool {
        countries::is_known_country_code(code)
    }

    fn country_name(&self, code: &str, locale: &str) -> Option<String> {
        countries::country_name(code, locale).map(String::from)
    }

    fn is_known_currency(&self, code: &str) -> bool {
        currencies::is_known_currency_code(code)
    }

    fn is_known_unit(&self, code: &str) -> bool {
        units::is_known_unit_code(code)
    }

    fn is_known_tax_scheme_list(&self, scheme_list: Option<&str>) -> bool {
        match scheme_list {
            None => true,
            Some(list) => TAX_SCHEME_LISTS.contains(&list.trim()),
        }
    }

    fn tax_scheme(&self, id: &str) -> TaxSchemeKind {
        if id.trim() == VAT_SCHEME_ID {
            TaxSchemeKind::Vat
        } else {
            TaxSchemeKind::Other
        }
    }
}
