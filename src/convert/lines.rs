//! Line item conversion.

use rust_decimal::Decimal;

use super::tax::{TaxPercentageMap, line_tax_rate};
use super::{Context, ORDER_REFERENCE_MAX_LENGTH, non_blank, normalize_allowance_charges};
use crate::core::{DEFAULT_UNIT_CODE, DiagnosticCode};
use crate::ebinterface::{
    ArticleNumber, ArticleNumberKind, Delivery, DeliveryTime, LineOrderReference, ListLineItem,
    Quantity,
};
use crate::ubl::{InvoiceLine, UblDocument};

/// Convert all lines in source order. `header_order_id` is the already
/// truncated document-level order reference used when a line names no
/// order of its own.
pub(crate) fn convert_lines(
    ctx: &mut Context<'_>,
    doc: &UblDocument,
    map: &TaxPercentageMap,
    header_order_id: Option<&str>,
) -> Vec<ListLineItem> {
    doc.lines
        .iter()
        .enumerate()
        .map(|(index, line)| convert_line(ctx, index, line, map, header_order_id))
        .collect()
}

fn convert_line(
    ctx: &mut Context<'_>,
    index: usize,
    line: &InvoiceLine,
    map: &TaxPercentageMap,
    header_order_id: Option<&str>,
) -> ListLineItem {
    let base = ctx.path(&format!("{}[{index}]", ctx.kind.line_element()));
    let quantity_path = format!("{base}/{}", ctx.kind.quantity_element());

    let position_number = position_number(ctx, index, line, &base);

    let mut descriptions: Vec<String> = line
        .item
        .descriptions
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect();
    if descriptions.is_empty() {
        descriptions.extend(non_blank(line.item.name.as_ref()).map(String::from));
    }

    let unit = match non_blank(line.unit_code.as_ref()) {
        Some(unit) => {
            if !ctx.code_lists.is_known_unit(unit) {
                ctx.warn(
                    format!("{quantity_path}/@unitCode"),
                    DiagnosticCode::UnknownUnitCode,
                    vec![unit.to_string()],
                );
            }
            unit.to_string()
        }
        None => {
            ctx.warn(
                format!("{quantity_path}/@unitCode"),
                DiagnosticCode::UnitCodeDefaulted,
                vec![DEFAULT_UNIT_CODE.to_string()],
            );
            DEFAULT_UNIT_CODE.to_string()
        }
    };
    let quantity = match line.quantity {
        Some(quantity) => quantity,
        None => {
            ctx.warn(
                quantity_path.as_str(),
                DiagnosticCode::QuantityDefaulted,
                vec![Decimal::ONE.to_string()],
            );
            Decimal::ONE
        }
    };

    let unit_price = unit_price(line, quantity);

    let tax_rate = match line_tax_rate(line, map) {
        Some(rate) => rate,
        None => {
            ctx.warn(
                format!("{base}/Item/ClassifiedTaxCategory"),
                DiagnosticCode::LineTaxRateDefaulted,
                vec![Decimal::ZERO.to_string()],
            );
            Decimal::ZERO
        }
    };

    let line_item_amount = match line.line_extension_amount {
        Some(amount) => amount,
        None => {
            ctx.error(
                format!("{base}/LineExtensionAmount"),
                DiagnosticCode::MissingLineAmount,
                vec![],
            );
            Decimal::ZERO
        }
    };

    let order_reference = order_reference(ctx, line, &base, header_order_id);

    let reduction_and_surcharge = if line.allowance_charges.is_empty() {
        None
    } else {
        let line_base = quantity.checked_mul(unit_price).unwrap_or_else(|| {
            ctx.error(format!("{base}/Price"), DiagnosticCode::AmountOverflow, vec![]);
            Decimal::ZERO
        });
        normalize_allowance_charges(&line.allowance_charges, line_base, ctx.profile.reduction_comments)
            .map(|n| {
                if n.final_base.is_none() {
                    ctx.error(format!("{base}/AllowanceCharge"), DiagnosticCode::AmountOverflow, vec![]);
                }
                n.details
            })
    };

    let delivery = if ctx.profile.line_delivery {
        line.deliveries
            .iter()
            .find_map(|d| d.actual_delivery_date)
            .map(|date| Delivery {
                time: DeliveryTime::Date(date),
                address: None,
            })
    } else {
        None
    };

    ListLineItem {
        position_number,
        descriptions,
        article_numbers: article_numbers(line),
        quantity: Quantity {
            unit,
            value: quantity,
        },
        unit_price,
        tax_rate,
        reduction_and_surcharge,
        line_item_amount,
        order_reference,
        delivery,
    }
}

/// Line id as a positive integer, else the 1-based index with a warning.
fn position_number(ctx: &mut Context<'_>, index: usize, line: &InvoiceLine, base: &str) -> u32 {
    let raw = non_blank(line.id.as_ref()).unwrap_or_default();
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            let fallback = u32::try_from(index + 1).unwrap_or(u32::MAX);
            ctx.warn(
                format!("{base}/ID"),
                DiagnosticCode::InvalidLinePosition,
                vec![raw.to_string(), fallback.to_string()],
            );
            fallback
        }
    }
}

/// Price ÷ base quantity when a price is given, else line amount ÷ quantity.
/// A zero divisor yields a zero price.
fn unit_price(line: &InvoiceLine, quantity: Decimal) -> Decimal {
    match &line.price {
        Some(price) => {
            let base_quantity = price.base_quantity.unwrap_or(Decimal::ONE);
            price.amount.checked_div(base_quantity).unwrap_or(Decimal::ZERO)
        }
        None => line
            .line_extension_amount
            .and_then(|amount| amount.checked_div(quantity))
            .unwrap_or(Decimal::ZERO),
    }
}

fn order_reference(
    ctx: &mut Context<'_>,
    line: &InvoiceLine,
    base: &str,
    header_order_id: Option<&str>,
) -> Option<LineOrderReference> {
    let (i, reference, line_id) = line
        .order_line_references
        .iter()
        .enumerate()
        .find_map(|(i, r)| non_blank(r.line_id.as_ref()).map(|id| (i, r, id)))?;

    let order_id = match non_blank(reference.order_id.as_ref()) {
        Some(own) => ctx.truncate(
            format!("{base}/OrderLineReference[{i}]/OrderReference/ID"),
            DiagnosticCode::OrderReferenceTruncated,
            own,
            ORDER_REFERENCE_MAX_LENGTH,
        ),
        None => header_order_id?.to_string(),
    };

    Some(LineOrderReference {
        order_id,
        order_position_number: Some(line_id.to_string()),
    })
}

fn article_numbers(line: &InvoiceLine) -> Vec<ArticleNumber> {
    [
        (ArticleNumberKind::SellersArticleNumber, &line.item.sellers_item_id),
        (ArticleNumberKind::BuyersArticleNumber, &line.item.buyers_item_id),
        (ArticleNumberKind::Gtin, &line.item.standard_item_id),
    ]
    .into_iter()
    .filter_map(|(kind, value)| {
        non_blank(value.as_ref()).map(|value| ArticleNumber {
            kind,
            value: value.to_string(),
        })
    })
    .collect()
}
