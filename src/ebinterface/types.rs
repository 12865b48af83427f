use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::version::EbVersion;

/// ebInterface `Invoice` root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EbInvoice {
    pub version: EbVersion,
    /// `@GeneratingSystem`.
    pub generating_system: String,
    /// `@DocumentType`.
    pub document_type: DocumentType,
    /// `@InvoiceCurrency` (ISO 4217).
    pub currency: String,
    /// `@IsDuplicate` (4.0+).
    pub is_duplicate: Option<bool>,
    pub invoice_number: String,
    pub invoice_date: Option<NaiveDate>,
    pub delivery: Option<Delivery>,
    pub biller: Biller,
    pub invoice_recipient: InvoiceRecipient,
    pub details: Details,
    /// Header-level `ReductionAndSurchargeDetails`.
    pub reduction_and_surcharge: Option<ReductionAndSurchargeDetails>,
    pub tax: Tax,
    pub total_gross_amount: Decimal,
    /// `PrepaidAmount` (4.1).
    pub prepaid_amount: Option<Decimal>,
    pub payable_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub payment_conditions: Option<PaymentConditions>,
    pub comment: Option<String>,
}

/// `@DocumentType` values used by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Invoice,
    CreditMemo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biller {
    pub vat_identification_number: String,
    /// Biller id assigned by the invoice recipient.
    pub invoice_recipients_biller_id: Option<String>,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecipient {
    pub vat_identification_number: String,
    /// Recipient id assigned by the biller.
    pub billers_invoice_recipient_id: Option<String>,
    pub order_reference: Option<OrderReference>,
    pub further_identifications: Vec<FurtherIdentification>,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReference {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurtherIdentification {
    /// `@IdentificationType`, e.g. "Contract".
    pub identification_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address_identifier: Option<AddressIdentifier>,
    pub name: String,
    pub street: Option<String>,
    pub po_box: Option<String>,
    pub town: String,
    pub zip: String,
    pub country: Option<Country>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// `@CountryCode`, set only when it passed code-list validation.
    pub code: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressIdentifier {
    pub identifier_type: AddressIdentifierType,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressIdentifierType {
    Gln,
    Duns,
    ProprietaryAddressId,
}

impl AddressIdentifierType {
    /// Map an identifier scheme code to an ebInterface identifier type.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.trim().to_ascii_uppercase().as_str() {
            "GLN" | "0088" => Some(Self::Gln),
            "DUNS" | "0060" => Some(Self::Duns),
            "ZZZ" => Some(Self::ProprietaryAddressId),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gln => "GLN",
            Self::Duns => "DUNS",
            Self::ProprietaryAddressId => "ProprietaryAddressID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub time: DeliveryTime,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryTime {
    Date(NaiveDate),
    Period { from: NaiveDate, to: NaiveDate },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub items: Vec<ListLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLineItem {
    pub position_number: u32,
    pub descriptions: Vec<String>,
    pub article_numbers: Vec<ArticleNumber>,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub tax_rate: Decimal,
    pub reduction_and_surcharge: Option<ReductionAndSurchargeDetails>,
    pub line_item_amount: Decimal,
    pub order_reference: Option<LineOrderReference>,
    pub delivery: Option<Delivery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub unit: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleNumber {
    pub kind: ArticleNumberKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleNumberKind {
    SellersArticleNumber,
    BuyersArticleNumber,
    Gtin,
}

/// `InvoiceRecipientsOrderReference` of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOrderReference {
    pub order_id: String,
    pub order_position_number: Option<String>,
}

/// Which target list a normalised reduction/surcharge block populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReductionSurchargeKind {
    Reduction,
    Surcharge,
}

/// A homogeneous list of reductions or surcharges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionAndSurchargeDetails {
    pub kind: ReductionSurchargeKind,
    pub items: Vec<ReductionSurchargeItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionSurchargeItem {
    pub base_amount: Decimal,
    pub percentage: Option<Decimal>,
    pub amount: Decimal,
    /// Only on versions with reduction comments.
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    pub vat_items: Vec<VatItem>,
    pub other_taxes: Vec<OtherTax>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatItem {
    pub taxed_amount: Decimal,
    pub vat_rate: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherTax {
    /// Tax scheme id as free text.
    pub comment: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentMethod {
    BankTransfer(UniversalBankTransaction),
    DirectDebit(DirectDebit),
    NoPayment(NoPayment),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalBankTransaction {
    pub beneficiary_account: Option<BeneficiaryAccount>,
    pub payment_reference: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryAccount {
    pub bic: Option<String>,
    pub iban: Option<String>,
    pub bank_account_nr: Option<String>,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectDebit {
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoPayment {
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentConditions {
    pub due_date: Option<NaiveDate>,
    pub discounts: Vec<Discount>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub payment_date: NaiveDate,
    pub percentage: Decimal,
}
