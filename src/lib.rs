//! # ebconvert
//!
//! Conversion of UBL 2.1 invoices and credit notes into the Austrian
//! ebInterface format (versions 3.0, 4.0 and 4.1).
//!
//! The crate works on already-parsed document trees: [`ubl::UblDocument`]
//! in, [`ebinterface::EbInvoice`] out. Every defaulting, truncation or
//! rejection decision is reported to a caller-owned
//! [`Diagnostics`](core::Diagnostics) collector as a symbolic code with
//! positional arguments.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ebconvert::core::*;
//! use ebconvert::convert::convert;
//! use ebconvert::ebinterface::EbVersion;
//! use ebconvert::ubl::*;
//! use rust_decimal_macros::dec;
//!
//! let doc = DocumentBuilder::invoice("RE-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .supplier(PartyBuilder::new("ACME GmbH")
//!         .address(AddressBuilder::new("Wien", "1010", "AT").street("Ring", "1").build())
//!         .vat_id("ATU12345678")
//!         .build())
//!     .customer(PartyBuilder::new("Kunde AG")
//!         .address(AddressBuilder::new("Graz", "8010", "AT").street("Hauptplatz", "1").build())
//!         .build())
//!     .vat_subtotal("S", dec!(100), dec!(20))
//!     .add_line(LineBuilder::new("1", "Beratung", dec!(100)).quantity(dec!(1), "HUR").vat("S", dec!(20)).build())
//!     .totals(dec!(100), dec!(120), dec!(120))
//!     .build();
//!
//! let mut diagnostics = Diagnostics::new();
//! let result = convert(&doc, EbVersion::V41, &ConversionSettings::default(), &mut diagnostics)
//!     .unwrap()
//!     .unwrap();
//!
//! assert!(!diagnostics.has_errors());
//! assert_eq!(result.payable_amount, dec!(120));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Source/target models, code lists, conversion engine |
//! | `json` | Load settings and source documents from JSON |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod ubl;

#[cfg(feature = "core")]
pub mod ebinterface;

#[cfg(feature = "core")]
pub mod convert;
