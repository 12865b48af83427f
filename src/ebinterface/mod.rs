//! ebInterface target document model (versions 3.0, 4.0, 4.1).
//!
//! One model covers all three versions; fields a version lacks stay `None`
//! (or empty) as decided by its [`VersionProfile`].

mod types;
mod version;

pub use types::*;
pub use version::{EbVersion, VersionProfile};

/// VAT identification number used when a party has none.
pub const VAT_ID_NOT_PROVIDED: &str = "00000000";
