//! Document-level assembly in fixed order: header, biller, recipient,
//! tax, lines, header reductions, totals, payment, delivery.

use rust_decimal::Decimal;

use super::{
    Context, ORDER_REFERENCE_MAX_LENGTH, delivery, join_non_blank, lines, non_blank,
    normalize_allowance_charges, party, payment, tax,
};
use crate::core::DiagnosticCode;
use crate::ebinterface::{
    Address, Biller, Details, DocumentType, EbInvoice, FurtherIdentification, InvoiceRecipient,
    OrderReference, Tax, VAT_ID_NOT_PROVIDED,
};
use crate::ubl::{DocumentKind, UblDocument};

const DEFAULT_CURRENCY: &str = "EUR";
const CONTRACT_IDENTIFICATION_TYPE: &str = "Contract";

pub(crate) fn assemble(ctx: &mut Context<'_>, doc: &UblDocument) -> EbInvoice {
    let currency = currency(ctx, doc);

    let invoice_number = match non_blank(doc.id.as_ref()) {
        Some(number) => number.to_string(),
        None => {
            let field = ctx.path("ID");
            ctx.error(field, DiagnosticCode::MissingInvoiceNumber, vec![]);
            String::new()
        }
    };
    if doc.issue_date.is_none() {
        let field = ctx.path("IssueDate");
        ctx.error(field, DiagnosticCode::MissingIssueDate, vec![]);
    }
    let is_duplicate = if ctx.profile.duplicate_flag {
        doc.copy_indicator
    } else {
        None
    };

    let biller = biller(ctx, doc);
    let invoice_recipient = invoice_recipient(ctx, doc);

    let (tax, map) = tax::convert_tax(ctx, doc);
    let header_order_id = invoice_recipient
        .order_reference
        .as_ref()
        .map(|r| r.order_id.as_str());
    let items = lines::convert_lines(ctx, doc, &map, header_order_id);

    if tax.vat_items.is_empty() {
        let field = ctx.path("TaxTotal");
        ctx.error(field, DiagnosticCode::NoVatItems, vec![]);
    }

    let reduction_base = match doc.monetary_total.line_extension_amount {
        Some(amount) => amount,
        None => checked_sum(items.iter().map(|i| i.line_item_amount)).unwrap_or_else(|| {
            let field = ctx.path(ctx.kind.line_element());
            ctx.error(field, DiagnosticCode::AmountOverflow, vec![]);
            Decimal::ZERO
        }),
    };
    let header_reductions = normalize_allowance_charges(
        &doc.allowance_charges,
        reduction_base,
        ctx.profile.reduction_comments,
    );
    let net = match doc.monetary_total.tax_exclusive_amount {
        Some(amount) => amount,
        None => match header_reductions.as_ref().map(|n| n.final_base) {
            None => reduction_base,
            Some(Some(final_base)) => final_base,
            Some(None) => {
                let field = ctx.path("AllowanceCharge");
                ctx.error(field, DiagnosticCode::AmountOverflow, vec![]);
                reduction_base
            }
        },
    };

    let total_gross_amount = match doc.monetary_total.tax_inclusive_amount {
        Some(amount) => amount,
        None => {
            let field = ctx.path("LegalMonetaryTotal/TaxInclusiveAmount");
            match total_tax(&tax).and_then(|t| net.checked_add(t)) {
                Some(computed) => {
                    ctx.warn(field, DiagnosticCode::TotalGrossAmountComputed, vec![computed.to_string()]);
                    computed
                }
                None => {
                    ctx.error(field, DiagnosticCode::AmountOverflow, vec![]);
                    net
                }
            }
        }
    };
    let prepaid = doc.monetary_total.prepaid_amount;
    let payable_amount = match doc.monetary_total.payable_amount {
        Some(amount) => amount,
        None => {
            let field = ctx.path("LegalMonetaryTotal/PayableAmount");
            match total_gross_amount.checked_sub(prepaid.unwrap_or(Decimal::ZERO)) {
                Some(computed) => {
                    ctx.warn(field, DiagnosticCode::PayableAmountComputed, vec![computed.to_string()]);
                    computed
                }
                None => {
                    ctx.error(field, DiagnosticCode::AmountOverflow, vec![]);
                    total_gross_amount
                }
            }
        }
    };

    let payment_method = payment::convert_payment_method(ctx, doc, payable_amount);
    let payment_conditions = payment::convert_payment_conditions(ctx, doc);
    let delivery = delivery::convert_delivery(ctx, doc);

    EbInvoice {
        version: ctx.profile.version,
        generating_system: ctx.settings.generating_system.clone(),
        document_type: match doc.kind {
            DocumentKind::Invoice => DocumentType::Invoice,
            DocumentKind::CreditNote => DocumentType::CreditMemo,
        },
        currency,
        is_duplicate,
        invoice_number,
        invoice_date: doc.issue_date,
        delivery,
        biller,
        invoice_recipient,
        details: Details { items },
        reduction_and_surcharge: header_reductions.map(|n| n.details),
        tax,
        total_gross_amount,
        prepaid_amount: if ctx.profile.prepaid_amount { prepaid } else { None },
        payable_amount,
        payment_method,
        payment_conditions,
        comment: join_non_blank(&doc.notes, "\n"),
    }
}

fn currency(ctx: &mut Context<'_>, doc: &UblDocument) -> String {
    let field = ctx.path("DocumentCurrencyCode");
    match non_blank(doc.currency_code.as_ref()) {
        Some(code) if ctx.code_lists.is_known_currency(code) => code.to_string(),
        Some(code) => {
            ctx.error(
                field,
                DiagnosticCode::UnsupportedCurrency,
                vec![code.to_string(), DEFAULT_CURRENCY.to_string()],
            );
            DEFAULT_CURRENCY.to_string()
        }
        None => {
            ctx.error(field, DiagnosticCode::MissingCurrency, vec![DEFAULT_CURRENCY.to_string()]);
            DEFAULT_CURRENCY.to_string()
        }
    }
}

fn biller(ctx: &mut Context<'_>, doc: &UblDocument) -> Biller {
    let path = ctx.path("AccountingSupplierParty/Party");
    let Some(supplier) = &doc.supplier else {
        let field = ctx.path("AccountingSupplierParty");
        ctx.error(field, DiagnosticCode::MissingSupplierParty, vec![]);
        return Biller {
            vat_identification_number: VAT_ID_NOT_PROVIDED.to_string(),
            invoice_recipients_biller_id: None,
            address: Address::default(),
        };
    };

    let vat_identification_number = match party::vat_id(supplier) {
        Some(id) => id.to_string(),
        None => {
            if ctx.settings.strict {
                ctx.error(
                    format!("{path}/PartyTaxScheme/CompanyID"),
                    DiagnosticCode::MissingBillerVatId,
                    vec![],
                );
            }
            VAT_ID_NOT_PROVIDED.to_string()
        }
    };

    Biller {
        vat_identification_number,
        invoice_recipients_biller_id: non_blank(supplier.customer_assigned_account_id.as_ref())
            .map(String::from),
        address: party::convert_party(ctx, supplier, &path),
    }
}

fn invoice_recipient(ctx: &mut Context<'_>, doc: &UblDocument) -> InvoiceRecipient {
    let order_reference = non_blank(doc.order_reference.as_ref()).map(|id| {
        let field = ctx.path("OrderReference/ID");
        OrderReference {
            order_id: ctx.truncate(
                field,
                DiagnosticCode::OrderReferenceTruncated,
                id,
                ORDER_REFERENCE_MAX_LENGTH,
            ),
        }
    });

    let further_identifications = if ctx.profile.further_identification {
        doc.contract_references
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(|r| FurtherIdentification {
                identification_type: CONTRACT_IDENTIFICATION_TYPE.to_string(),
                value: r.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let path = ctx.path("AccountingCustomerParty/Party");
    let Some(customer) = &doc.customer else {
        let field = ctx.path("AccountingCustomerParty");
        ctx.error(field, DiagnosticCode::MissingCustomerParty, vec![]);
        return InvoiceRecipient {
            vat_identification_number: VAT_ID_NOT_PROVIDED.to_string(),
            billers_invoice_recipient_id: None,
            order_reference,
            further_identifications,
            address: Address::default(),
        };
    };

    InvoiceRecipient {
        vat_identification_number: party::vat_id(customer)
            .unwrap_or(VAT_ID_NOT_PROVIDED)
            .to_string(),
        billers_invoice_recipient_id: non_blank(customer.supplier_assigned_account_id.as_ref())
            .map(String::from),
        order_reference,
        further_identifications,
        address: party::convert_party(ctx, customer, &path),
    }
}

/// Sum of VAT and other tax amounts; `None` on overflow.
fn total_tax(tax: &Tax) -> Option<Decimal> {
    checked_sum(
        tax.vat_items
            .iter()
            .map(|v| v.amount)
            .chain(tax.other_taxes.iter().map(|o| o.amount)),
    )
}

fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
}
