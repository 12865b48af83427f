use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{SchemedId, TaxCategoryKey};

/// Root element kind of the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    #[default]
    Invoice,
    CreditNote,
}

impl DocumentKind {
    /// UBL root element name, used as the first segment of field paths.
    pub fn root_element(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::CreditNote => "CreditNote",
        }
    }

    /// Element name of a document line.
    pub fn line_element(&self) -> &'static str {
        match self {
            Self::Invoice => "InvoiceLine",
            Self::CreditNote => "CreditNoteLine",
        }
    }

    /// Element name of a line's quantity.
    pub fn quantity_element(&self) -> &'static str {
        match self {
            Self::Invoice => "InvoicedQuantity",
            Self::CreditNote => "CreditedQuantity",
        }
    }
}

/// A parsed UBL 2.1 `Invoice` or `CreditNote`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UblDocument {
    pub kind: DocumentKind,
    /// `UBLVersionID`.
    pub ubl_version_id: Option<String>,
    /// `CustomizationID`.
    pub customization_id: Option<String>,
    /// `ProfileID`: business process identifier.
    pub profile_id: Option<String>,
    /// `ID`: document number.
    pub id: Option<String>,
    /// `CopyIndicator`.
    pub copy_indicator: Option<bool>,
    pub issue_date: Option<NaiveDate>,
    /// `DueDate` (header level, UBL 2.1 invoices).
    pub due_date: Option<NaiveDate>,
    /// `InvoiceTypeCode` (invoices only).
    pub type_code: Option<String>,
    pub notes: Vec<String>,
    /// `DocumentCurrencyCode`.
    pub currency_code: Option<String>,
    pub invoice_periods: Vec<Period>,
    /// `OrderReference/ID`.
    pub order_reference: Option<String>,
    /// `ContractDocumentReference/ID` entries.
    pub contract_references: Vec<String>,
    /// `AccountingSupplierParty`.
    pub supplier: Option<Party>,
    /// `AccountingCustomerParty`.
    pub customer: Option<Party>,
    pub deliveries: Vec<Delivery>,
    pub payment_means: Vec<PaymentMeans>,
    pub payment_terms: Vec<PaymentTerms>,
    /// Document-level `AllowanceCharge` entries.
    pub allowance_charges: Vec<AllowanceCharge>,
    pub tax_totals: Vec<TaxTotal>,
    /// `LegalMonetaryTotal`.
    pub monetary_total: MonetaryTotal,
    pub lines: Vec<InvoiceLine>,
}

impl UblDocument {
    /// Deserialize a document tree from JSON.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, crate::core::ConversionError> {
        serde_json::from_str(json).map_err(|e| crate::core::ConversionError::Document(e.to_string()))
    }
}

/// Accounting party with account ids and the `Party` aggregate flattened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    /// `CustomerAssignedAccountID`.
    pub customer_assigned_account_id: Option<String>,
    /// `SupplierAssignedAccountID`.
    pub supplier_assigned_account_id: Option<String>,
    /// `EndpointID`.
    pub endpoint_id: Option<SchemedId>,
    /// `PartyIdentification/ID` entries.
    pub identifications: Vec<SchemedId>,
    /// `PartyName/Name` entries.
    pub names: Vec<String>,
    pub postal_address: Option<PostalAddress>,
    pub tax_schemes: Vec<PartyTaxScheme>,
    pub contact: Option<Contact>,
    pub persons: Vec<Person>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalAddress {
    pub street_name: Option<String>,
    pub additional_street_name: Option<String>,
    pub building_number: Option<String>,
    pub postbox: Option<String>,
    pub city_name: Option<String>,
    pub postal_zone: Option<String>,
    pub country: Option<Country>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    /// `IdentificationCode` (ISO 3166-1 alpha-2).
    pub identification_code: Option<String>,
    /// Free-text `Name`.
    pub name: Option<String>,
}

/// `PartyTaxScheme`: a tax registration of a party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyTaxScheme {
    /// `CompanyID`, e.g. "ATU12345678".
    pub company_id: Option<String>,
    /// `TaxScheme/ID`, e.g. "VAT".
    pub tax_scheme_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: Option<String>,
    pub telephone: Option<String>,
    pub electronic_mail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub family_name: Option<String>,
    pub name_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delivery {
    pub actual_delivery_date: Option<NaiveDate>,
    /// `DeliveryLocation/Address`.
    pub location_address: Option<PostalAddress>,
    /// `DeliveryParty/PartyName/Name`.
    pub party_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMeans {
    /// `PaymentMeansCode` (UNCL 4461).
    pub code: Option<String>,
    pub payment_due_date: Option<NaiveDate>,
    /// `PaymentChannelCode`, e.g. "IBAN".
    pub payment_channel_code: Option<String>,
    pub instruction_notes: Vec<String>,
    /// `PaymentID` entries.
    pub payment_ids: Vec<String>,
    pub payee_financial_account: Option<FinancialAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialAccount {
    /// Account `ID` (IBAN or national account number).
    pub id: Option<String>,
    /// Account holder `Name`.
    pub name: Option<String>,
    /// `FinancialInstitutionBranch/FinancialInstitution/ID` (BIC).
    pub institution_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentTerms {
    pub notes: Vec<String>,
    pub settlement_discount_percent: Option<Decimal>,
    /// `SettlementPeriod/EndDate`.
    pub settlement_period_end: Option<NaiveDate>,
    pub penalty_surcharge_percent: Option<Decimal>,
}

/// `AllowanceCharge` on document or line level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceCharge {
    /// `ChargeIndicator`: true = surcharge, false = reduction.
    pub charge_indicator: bool,
    /// `AllowanceChargeReason` texts.
    pub reasons: Vec<String>,
    /// `MultiplierFactorNumeric`, expressed as a percentage.
    pub multiplier_factor: Option<Decimal>,
    pub amount: Decimal,
    pub base_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTotal {
    pub tax_amount: Option<Decimal>,
    pub subtotals: Vec<TaxSubtotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSubtotal {
    pub taxable_amount: Option<Decimal>,
    pub tax_amount: Decimal,
    pub category: TaxCategory,
}

/// `TaxCategory` / `ClassifiedTaxCategory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCategory {
    /// Category `ID` with its `schemeID` (e.g. "UN/ECE 5305").
    pub id: SchemedId,
    pub percent: Option<Decimal>,
    /// `TaxScheme/ID` with its `schemeID` (e.g. "UN/ECE 5153").
    pub tax_scheme: SchemedId,
}

impl TaxCategory {
    /// Reconciliation key of this category.
    pub fn key(&self) -> TaxCategoryKey {
        TaxCategoryKey::new(self.tax_scheme.clone(), self.id.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonetaryTotal {
    pub line_extension_amount: Option<Decimal>,
    pub tax_exclusive_amount: Option<Decimal>,
    pub tax_inclusive_amount: Option<Decimal>,
    pub prepaid_amount: Option<Decimal>,
    pub payable_amount: Option<Decimal>,
}

/// `InvoiceLine` / `CreditNoteLine`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceLine {
    pub id: Option<String>,
    /// `InvoicedQuantity` / `CreditedQuantity` value.
    pub quantity: Option<Decimal>,
    /// `unitCode` attribute of the quantity.
    pub unit_code: Option<String>,
    pub line_extension_amount: Option<Decimal>,
    pub order_line_references: Vec<OrderLineReference>,
    pub deliveries: Vec<Delivery>,
    pub tax_totals: Vec<TaxTotal>,
    pub allowance_charges: Vec<AllowanceCharge>,
    pub item: Item,
    pub price: Option<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLineReference {
    /// `LineID`: position in the buyer's order.
    pub line_id: Option<String>,
    /// `OrderReference/ID`.
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub descriptions: Vec<String>,
    pub name: Option<String>,
    pub sellers_item_id: Option<String>,
    pub buyers_item_id: Option<String>,
    /// `StandardItemIdentification/ID` (GTIN).
    pub standard_item_id: Option<String>,
    /// `ClassifiedTaxCategory`.
    pub tax_category: Option<TaxCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub amount: Decimal,
    pub base_quantity: Option<Decimal>,
}
