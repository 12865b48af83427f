//! Shared building blocks: composite keys, the diagnostics collector,
//! conversion settings, errors and code-list registries.

mod codelists;
pub mod countries;
pub mod currencies;
mod diagnostics;
mod error;
mod keys;
mod settings;
pub mod units;

pub use codelists::*;
pub use diagnostics::*;
pub use error::*;
pub use keys::*;
pub use settings::*;
pub use units::DEFAULT_UNIT_CODE;
