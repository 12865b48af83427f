use serde::{Deserialize, Serialize};

/// Supported ebInterface target versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EbVersion {
    V30,
    V40,
    V41,
}

impl EbVersion {
    pub const ALL: [EbVersion; 3] = [Self::V30, Self::V40, Self::V41];

    /// XML namespace URI of the version's schema.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::V30 => "http://www.ebinterface.at/schema/3p0/",
            Self::V40 => "http://www.ebinterface.at/schema/4p0/",
            Self::V41 => "http://www.ebinterface.at/schema/4p1/",
        }
    }

    /// Dotted version string, e.g. "4.1".
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V30 => "3.0",
            Self::V40 => "4.0",
            Self::V41 => "4.1",
        }
    }

    /// Structural capabilities of this version.
    pub fn profile(&self) -> VersionProfile {
        match self {
            Self::V30 => VersionProfile {
                version: *self,
                direct_debit: false,
                no_payment: false,
                further_identification: false,
                reduction_comments: false,
                duplicate_flag: false,
                line_delivery: false,
                prepaid_amount: false,
            },
            Self::V40 => VersionProfile {
                version: *self,
                direct_debit: true,
                no_payment: true,
                further_identification: true,
                reduction_comments: true,
                duplicate_flag: true,
                line_delivery: true,
                prepaid_amount: false,
            },
            Self::V41 => VersionProfile {
                version: *self,
                direct_debit: true,
                no_payment: true,
                further_identification: true,
                reduction_comments: true,
                duplicate_flag: true,
                line_delivery: true,
                prepaid_amount: true,
            },
        }
    }
}

impl std::fmt::Display for EbVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ebInterface {}", self.as_str())
    }
}

/// Which optional target structures a version offers.
///
/// The converter is a single assembler driven by this descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionProfile {
    pub version: EbVersion,
    /// `PaymentMethod/DirectDebit` exists.
    pub direct_debit: bool,
    /// `PaymentMethod/NoPayment` exists.
    pub no_payment: bool,
    /// `InvoiceRecipient/FurtherIdentification` exists.
    pub further_identification: bool,
    /// Reduction/surcharge entries carry a `Comment`.
    pub reduction_comments: bool,
    /// `IsDuplicate` attribute exists.
    pub duplicate_flag: bool,
    /// `ListLineItem/Delivery` exists.
    pub line_delivery: bool,
    /// `PrepaidAmount` exists.
    pub prepaid_amount: bool,
}
