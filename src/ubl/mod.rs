//! UBL 2.1 source document model.
//!
//! The converter consumes these trees as already parsed from XML; only the
//! elements the ebInterface mapping reads are modelled.

mod builder;
mod types;

pub use builder::*;
pub use types::*;

/// The only `UBLVersionID` accepted by the converter.
pub const UBL_VERSION_21: &str = "2.1";

/// UNCL 1001 code of a commercial invoice.
pub const INVOICE_TYPE_CODE_COMMERCIAL: &str = "380";

/// Peppol BIS Billing 3.0 profile identifier.
pub const PEPPOL_BILLING_PROFILE_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// Scheme of UBL tax category codes.
pub const TAX_CATEGORY_SCHEME: &str = "UN/ECE 5305";

/// Scheme of UBL tax scheme ids.
pub const TAX_SCHEME_LIST: &str = "UN/ECE 5153";
