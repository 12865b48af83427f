use serde::{Deserialize, Serialize};

/// Severity of a conversion finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// A default was substituted, a value truncated or input ignored.
    Warning,
    /// A mandatory datum is missing or a value is unsupported.
    Error,
}

/// Symbolic code of a conversion finding.
///
/// Codes are stable identifiers; turning them into human text is the job
/// of a [`MessageResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagnosticCode {
    // consistency
    MissingUblVersion,
    UnsupportedUblVersion,
    MissingProfileId,
    UnsupportedProfileId,
    MissingInvoiceTypeCode,
    UnsupportedInvoiceTypeCode,

    // header
    MissingCurrency,
    UnsupportedCurrency,
    MissingInvoiceNumber,
    MissingIssueDate,
    OrderReferenceTruncated,

    // parties and addresses
    MissingSupplierParty,
    MissingCustomerParty,
    MissingBillerVatId,
    MissingPartyName,
    MultiplePartyNames,
    MissingPostalAddress,
    MissingStreet,
    MissingTown,
    MissingZip,
    MissingCountry,
    UnsupportedCountryCode,
    IgnoredPartyIdentifier,

    // tax
    UnsupportedTaxScheme,
    TaxPercentageUnresolved,
    NoVatItems,

    // lines
    InvalidLinePosition,
    UnitCodeDefaulted,
    QuantityDefaulted,
    UnknownUnitCode,
    LineTaxRateDefaulted,
    MissingLineAmount,

    // totals
    TotalGrossAmountComputed,
    PayableAmountComputed,
    AmountOverflow,

    // payment
    UnsupportedPaymentMeans,
    UnsupportedPaymentChannel,
    MissingPaymentAccount,
    IbanTruncated,
    PaymentReferenceTruncated,
    MissingPaymentMethod,
    DiscountWithoutDate,
    PenaltyNotSupported,
    MissingPaymentDueDate,

    // delivery
    MissingDelivery,
}

impl DiagnosticCode {
    /// Stable upper-snake-case key, suitable for message catalogues.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingUblVersion => "MISSING_UBL_VERSION",
            Self::UnsupportedUblVersion => "UNSUPPORTED_UBL_VERSION",
            Self::MissingProfileId => "MISSING_PROFILE_ID",
            Self::UnsupportedProfileId => "UNSUPPORTED_PROFILE_ID",
            Self::MissingInvoiceTypeCode => "MISSING_INVOICE_TYPE_CODE",
            Self::UnsupportedInvoiceTypeCode => "UNSUPPORTED_INVOICE_TYPE_CODE",
            Self::MissingCurrency => "MISSING_CURRENCY",
            Self::UnsupportedCurrency => "UNSUPPORTED_CURRENCY",
            Self::MissingInvoiceNumber => "MISSING_INVOICE_NUMBER",
            Self::MissingIssueDate => "MISSING_ISSUE_DATE",
            Self::OrderReferenceTruncated => "ORDER_REFERENCE_TRUNCATED",
            Self::MissingSupplierParty => "MISSING_SUPPLIER_PARTY",
            Self::MissingCustomerParty => "MISSING_CUSTOMER_PARTY",
            Self::MissingBillerVatId => "MISSING_BILLER_VAT_ID",
            Self::MissingPartyName => "MISSING_PARTY_NAME",
            Self::MultiplePartyNames => "MULTIPLE_PARTY_NAMES",
            Self::MissingPostalAddress => "MISSING_POSTAL_ADDRESS",
            Self::MissingStreet => "MISSING_STREET",
            Self::MissingTown => "MISSING_TOWN",
            Self::MissingZip => "MISSING_ZIP",
            Self::MissingCountry => "MISSING_COUNTRY",
            Self::UnsupportedCountryCode => "UNSUPPORTED_COUNTRY_CODE",
            Self::IgnoredPartyIdentifier => "IGNORED_PARTY_IDENTIFIER",
            Self::UnsupportedTaxScheme => "UNSUPPORTED_TAX_SCHEME",
            Self::TaxPercentageUnresolved => "TAX_PERCENTAGE_UNRESOLVED",
            Self::NoVatItems => "NO_VAT_ITEMS",
            Self::InvalidLinePosition => "INVALID_LINE_POSITION",
            Self::UnitCodeDefaulted => "UNIT_CODE_DEFAULTED",
            Self::QuantityDefaulted => "QUANTITY_DEFAULTED",
            Self::UnknownUnitCode => "UNKNOWN_UNIT_CODE",
            Self::LineTaxRateDefaulted => "LINE_TAX_RATE_DEFAULTED",
            Self::MissingLineAmount => "MISSING_LINE_AMOUNT",
            Self::TotalGrossAmountComputed => "TOTAL_GROSS_AMOUNT_COMPUTED",
            Self::PayableAmountComputed => "PAYABLE_AMOUNT_COMPUTED",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::UnsupportedPaymentMeans => "UNSUPPORTED_PAYMENT_MEANS",
            Self::UnsupportedPaymentChannel => "UNSUPPORTED_PAYMENT_CHANNEL",
            Self::MissingPaymentAccount => "MISSING_PAYMENT_ACCOUNT",
            Self::IbanTruncated => "IBAN_TRUNCATED",
            Self::PaymentReferenceTruncated => "PAYMENT_REFERENCE_TRUNCATED",
            Self::MissingPaymentMethod => "MISSING_PAYMENT_METHOD",
            Self::DiscountWithoutDate => "DISCOUNT_WITHOUT_DATE",
            Self::PenaltyNotSupported => "PENALTY_NOT_SUPPORTED",
            Self::MissingPaymentDueDate => "MISSING_PAYMENT_DUE_DATE",
            Self::MissingDelivery => "MISSING_DELIVERY",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a symbolic code plus arguments into text for one locale.
///
/// Implemented outside this crate (message catalogues are not part of
/// the conversion engine).
pub trait MessageResolver {
    fn resolve(&self, code: DiagnosticCode, args: &[String], locale: &str) -> String;
}

/// A single conversion finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Slash-separated path into the source document, with array indices
    /// (e.g. "Invoice/InvoiceLine[2]/InvoicedQuantity").
    pub field: String,
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Positional message arguments.
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render the message text via an external resolver.
    pub fn render(&self, resolver: &dyn MessageResolver, locale: &str) -> String {
        resolver.resolve(self.code, &self.args, locale)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.field)?;
        if !self.args.is_empty() {
            write!(f, ": {}", self.args.join(", "))?;
        }
        Ok(())
    }
}

/// Ordered, append-only sink of conversion findings.
///
/// Owned by the caller; one collector per conversion call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding.
    pub fn push(
        &mut self,
        field: impl Into<String>,
        severity: Severity,
        code: DiagnosticCode,
        args: Vec<String>,
    ) {
        self.entries.push(Diagnostic {
            field: field.into(),
            severity,
            code,
            args,
        });
    }

    pub fn warn(&mut self, field: impl Into<String>, code: DiagnosticCode, args: Vec<String>) {
        self.push(field, Severity::Warning, code, args);
    }

    pub fn error(&mut self, field: impl Into<String>, code: DiagnosticCode, args: Vec<String>) {
        self.push(field, Severity::Error, code, args);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// True if any entry has error severity.
    pub fn has_errors(&self) -> bool {
        self.has_at_least(Severity::Error)
    }

    /// True if any entry is at or above `severity`.
    pub fn has_at_least(&self, severity: Severity) -> bool {
        self.entries.iter().any(|d| d.severity >= severity)
    }

    /// Highest severity recorded, `None` when empty.
    pub fn most_severe(&self) -> Option<Severity> {
        self.entries.iter().map(|d| d.severity).max()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Entries carrying `code`, in insertion order.
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.code == code)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
