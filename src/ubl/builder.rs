use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;
use super::{
    INVOICE_TYPE_CODE_COMMERCIAL, PEPPOL_BILLING_PROFILE_ID, TAX_CATEGORY_SCHEME,
    TAX_SCHEME_LIST, UBL_VERSION_21,
};
use crate::core::SchemedId;

/// VAT tax category with the usual UN/ECE scheme qualifiers.
pub fn vat_category(id: impl Into<String>, percent: Option<Decimal>) -> TaxCategory {
    TaxCategory {
        id: SchemedId::with_scheme(TAX_CATEGORY_SCHEME, id),
        percent,
        tax_scheme: SchemedId::with_scheme(TAX_SCHEME_LIST, "VAT"),
    }
}

/// Builder for source documents.
///
/// Starts from a document that passes the consistency check: UBL 2.1,
/// Peppol billing profile, type code 380 for invoices, EUR.
///
/// ```
/// use ebconvert::ubl::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let doc = DocumentBuilder::invoice("INV-1", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .supplier(PartyBuilder::new("ACME GmbH")
///         .address(AddressBuilder::new("Wien", "1010", "AT").build())
///         .build())
///     .add_line(LineBuilder::new("1", "Beratung", dec!(150)).quantity(dec!(1), "HUR").build())
///     .build();
/// assert_eq!(doc.lines.len(), 1);
/// ```
pub struct DocumentBuilder {
    doc: UblDocument,
}

impl DocumentBuilder {
    pub fn invoice(id: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self::new(DocumentKind::Invoice, id.into(), issue_date)
    }

    pub fn credit_note(id: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self::new(DocumentKind::CreditNote, id.into(), issue_date)
    }

    fn new(kind: DocumentKind, id: String, issue_date: NaiveDate) -> Self {
        let type_code = match kind {
            DocumentKind::Invoice => Some(INVOICE_TYPE_CODE_COMMERCIAL.to_string()),
            DocumentKind::CreditNote => None,
        };
        Self {
            doc: UblDocument {
                kind,
                ubl_version_id: Some(UBL_VERSION_21.to_string()),
                profile_id: Some(PEPPOL_BILLING_PROFILE_ID.to_string()),
                id: Some(id),
                issue_date: Some(issue_date),
                type_code,
                currency_code: Some("EUR".to_string()),
                ..UblDocument::default()
            },
        }
    }

    pub fn profile_id(mut self, id: impl Into<String>) -> Self {
        self.doc.profile_id = Some(id.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.doc.currency_code = Some(code.into());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.doc.due_date = Some(date);
        self
    }

    pub fn copy(mut self, copy: bool) -> Self {
        self.doc.copy_indicator = Some(copy);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.doc.notes.push(note.into());
        self
    }

    pub fn order_reference(mut self, reference: impl Into<String>) -> Self {
        self.doc.order_reference = Some(reference.into());
        self
    }

    pub fn contract_reference(mut self, reference: impl Into<String>) -> Self {
        self.doc.contract_references.push(reference.into());
        self
    }

    pub fn invoice_period(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.doc.invoice_periods.push(Period {
            start_date: start,
            end_date: end,
        });
        self
    }

    pub fn supplier(mut self, party: Party) -> Self {
        self.doc.supplier = Some(party);
        self
    }

    pub fn customer(mut self, party: Party) -> Self {
        self.doc.customer = Some(party);
        self
    }

    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.doc.deliveries.push(delivery);
        self
    }

    pub fn payment_means(mut self, means: PaymentMeans) -> Self {
        self.doc.payment_means.push(means);
        self
    }

    pub fn payment_terms(mut self, terms: PaymentTerms) -> Self {
        self.doc.payment_terms.push(terms);
        self
    }

    pub fn add_allowance_charge(mut self, entry: AllowanceCharge) -> Self {
        self.doc.allowance_charges.push(entry);
        self
    }

    /// Add a subtotal to the first tax total, creating it if needed.
    pub fn tax_subtotal(mut self, subtotal: TaxSubtotal) -> Self {
        if self.doc.tax_totals.is_empty() {
            self.doc.tax_totals.push(TaxTotal::default());
        }
        let total = &mut self.doc.tax_totals[0];
        total.tax_amount = Some(
            total.tax_amount.unwrap_or(Decimal::ZERO).saturating_add(subtotal.tax_amount),
        );
        total.subtotals.push(subtotal);
        self
    }

    /// VAT subtotal whose percentage is left to be derived from the amounts.
    pub fn vat_subtotal(self, category: &str, taxable: Decimal, tax: Decimal) -> Self {
        self.tax_subtotal(TaxSubtotal {
            taxable_amount: Some(taxable),
            tax_amount: tax,
            category: vat_category(category, None),
        })
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.doc.lines.push(line);
        self
    }

    /// Line extension, tax inclusive and payable amount.
    pub fn totals(mut self, line_extension: Decimal, tax_inclusive: Decimal, payable: Decimal) -> Self {
        self.doc.monetary_total.line_extension_amount = Some(line_extension);
        self.doc.monetary_total.tax_inclusive_amount = Some(tax_inclusive);
        self.doc.monetary_total.payable_amount = Some(payable);
        self
    }

    pub fn prepaid(mut self, amount: Decimal) -> Self {
        self.doc.monetary_total.prepaid_amount = Some(amount);
        self
    }

    pub fn build(self) -> UblDocument {
        self.doc
    }
}

/// Builder for accounting parties.
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            party: Party {
                names: vec![name.into()],
                ..Party::default()
            },
        }
    }

    /// Party without any `PartyName`.
    pub fn unnamed() -> Self {
        Self {
            party: Party::default(),
        }
    }

    /// Additional `PartyName`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.party.names.push(name.into());
        self
    }

    pub fn address(mut self, address: PostalAddress) -> Self {
        self.party.postal_address = Some(address);
        self
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.party.tax_schemes.push(PartyTaxScheme {
            company_id: Some(id.into()),
            tax_scheme_id: Some("VAT".to_string()),
        });
        self
    }

    pub fn endpoint(mut self, scheme: impl Into<String>, value: impl Into<String>) -> Self {
        self.party.endpoint_id = Some(SchemedId::with_scheme(scheme, value));
        self
    }

    pub fn identification(mut self, scheme: impl Into<String>, value: impl Into<String>) -> Self {
        self.party
            .identifications
            .push(SchemedId::with_scheme(scheme, value));
        self
    }

    pub fn contact(
        mut self,
        name: Option<String>,
        telephone: Option<String>,
        electronic_mail: Option<String>,
    ) -> Self {
        self.party.contact = Some(Contact {
            name,
            telephone,
            electronic_mail,
        });
        self
    }

    pub fn person(mut self, person: Person) -> Self {
        self.party.persons.push(person);
        self
    }

    pub fn customer_assigned_account_id(mut self, id: impl Into<String>) -> Self {
        self.party.customer_assigned_account_id = Some(id.into());
        self
    }

    pub fn supplier_assigned_account_id(mut self, id: impl Into<String>) -> Self {
        self.party.supplier_assigned_account_id = Some(id.into());
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

/// Builder for postal addresses.
pub struct AddressBuilder {
    address: PostalAddress,
}

impl AddressBuilder {
    pub fn new(
        city: impl Into<String>,
        postal_zone: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address: PostalAddress {
                city_name: Some(city.into()),
                postal_zone: Some(postal_zone.into()),
                country: Some(Country {
                    identification_code: Some(country_code.into()),
                    name: None,
                }),
                ..PostalAddress::default()
            },
        }
    }

    /// Address with no fields set.
    pub fn empty() -> Self {
        Self {
            address: PostalAddress::default(),
        }
    }

    pub fn street(mut self, name: impl Into<String>, building_number: impl Into<String>) -> Self {
        self.address.street_name = Some(name.into());
        self.address.building_number = Some(building_number.into());
        self
    }

    pub fn postbox(mut self, postbox: impl Into<String>) -> Self {
        self.address.postbox = Some(postbox.into());
        self
    }

    pub fn country_name(mut self, name: impl Into<String>) -> Self {
        let country = self.address.country.get_or_insert_with(Country::default);
        country.name = Some(name.into());
        self
    }

    pub fn build(self) -> PostalAddress {
        self.address
    }
}

/// Builder for document lines.
pub struct LineBuilder {
    line: InvoiceLine,
}

impl LineBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, line_extension: Decimal) -> Self {
        Self {
            line: InvoiceLine {
                id: Some(id.into()),
                line_extension_amount: Some(line_extension),
                item: Item {
                    name: Some(name.into()),
                    ..Item::default()
                },
                ..InvoiceLine::default()
            },
        }
    }

    pub fn quantity(mut self, quantity: Decimal, unit_code: impl Into<String>) -> Self {
        self.line.quantity = Some(quantity);
        self.line.unit_code = Some(unit_code.into());
        self
    }

    pub fn price(mut self, amount: Decimal, base_quantity: Option<Decimal>) -> Self {
        self.line.price = Some(Price {
            amount,
            base_quantity,
        });
        self
    }

    /// `ClassifiedTaxCategory` in the VAT scheme.
    pub fn vat(mut self, category: &str, percent: Decimal) -> Self {
        self.line.item.tax_category = Some(vat_category(category, Some(percent)));
        self
    }

    pub fn tax_category(mut self, category: TaxCategory) -> Self {
        self.line.item.tax_category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.line.item.descriptions.push(description.into());
        self
    }

    pub fn sellers_item_id(mut self, id: impl Into<String>) -> Self {
        self.line.item.sellers_item_id = Some(id.into());
        self
    }

    pub fn order_line_reference(mut self, line_id: impl Into<String>, order_id: Option<String>) -> Self {
        self.line.order_line_references.push(OrderLineReference {
            line_id: Some(line_id.into()),
            order_id,
        });
        self
    }

    pub fn add_allowance_charge(mut self, entry: AllowanceCharge) -> Self {
        self.line.allowance_charges.push(entry);
        self
    }

    pub fn build(self) -> InvoiceLine {
        self.line
    }
}

/// Reduction (`ChargeIndicator` false) of `amount`.
pub fn allowance(amount: Decimal) -> AllowanceCharge {
    AllowanceCharge {
        charge_indicator: false,
        amount,
        ..AllowanceCharge::default()
    }
}

/// Surcharge (`ChargeIndicator` true) of `amount`.
pub fn charge(amount: Decimal) -> AllowanceCharge {
    AllowanceCharge {
        charge_indicator: true,
        amount,
        ..AllowanceCharge::default()
    }
}
