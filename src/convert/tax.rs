//! Tax reconciliation: header VAT items, other taxes and the
//! category → percentage map used by lines without their own rate.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::Context;
use crate::core::{DiagnosticCode, TaxCategoryKey, TaxSchemeKind, VAT_SCHEME_ID};
use crate::ebinterface::{OtherTax, Tax, VatItem};
use crate::ubl::{InvoiceLine, TaxSubtotal, UblDocument};

/// Resolved percentage per (tax scheme, tax category) seen on header level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxPercentageMap {
    percentages: HashMap<TaxCategoryKey, Decimal>,
}

impl TaxPercentageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a percentage; a later insert for the same key replaces it.
    pub fn insert(&mut self, key: TaxCategoryKey, percentage: Decimal) {
        self.percentages.insert(key, percentage);
    }

    pub fn get(&self, key: &TaxCategoryKey) -> Option<Decimal> {
        self.percentages.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.percentages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.percentages.is_empty()
    }
}

/// Percentage of a subtotal: the category's own percent, else
/// tax ÷ taxable × 100 rounded half-up to two places.
///
/// `None` when neither is available or the division does not fit a
/// [`Decimal`].
pub fn resolve_percentage(subtotal: &TaxSubtotal) -> Option<Decimal> {
    if let Some(percent) = subtotal.category.percent {
        return Some(percent);
    }
    let taxable = subtotal.taxable_amount.filter(|t| !t.is_zero())?;
    subtotal
        .tax_amount
        .checked_mul(dec!(100))
        .and_then(|scaled| scaled.checked_div(taxable))
        .map(|percent| round_half_up(percent, 2))
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Walk all header tax subtotals.
pub(crate) fn convert_tax(ctx: &mut Context<'_>, doc: &UblDocument) -> (Tax, TaxPercentageMap) {
    let mut tax = Tax::default();
    let mut map = TaxPercentageMap::new();

    for (t, total) in doc.tax_totals.iter().enumerate() {
        for (s, subtotal) in total.subtotals.iter().enumerate() {
            let path = ctx.path(&format!("TaxTotal[{t}]/TaxSubtotal[{s}]/TaxCategory"));
            let scheme = &subtotal.category.tax_scheme;
            let kind = ctx
                .code_lists
                .is_known_tax_scheme_list(scheme.scheme())
                .then(|| ctx.code_lists.tax_scheme(&scheme.value));

            let percentage = match resolve_percentage(subtotal) {
                Some(p) => p,
                None => {
                    if kind == Some(TaxSchemeKind::Vat) {
                        ctx.warn(
                            format!("{path}/Percent"),
                            DiagnosticCode::TaxPercentageUnresolved,
                            vec![scheme.value.clone(), subtotal.category.id.value.clone()],
                        );
                    }
                    Decimal::ZERO
                }
            };
            map.insert(subtotal.category.key(), percentage);

            match kind {
                Some(TaxSchemeKind::Vat) => tax.vat_items.push(VatItem {
                    taxed_amount: subtotal.taxable_amount.unwrap_or(Decimal::ZERO),
                    vat_rate: percentage,
                    amount: subtotal.tax_amount,
                }),
                Some(TaxSchemeKind::Other) => tax.other_taxes.push(OtherTax {
                    comment: scheme.value.trim().to_string(),
                    amount: subtotal.tax_amount,
                }),
                None => ctx.error(
                    format!("{path}/TaxScheme/ID"),
                    DiagnosticCode::UnsupportedTaxScheme,
                    vec![
                        scheme.scheme().unwrap_or_default().to_string(),
                        scheme.value.clone(),
                    ],
                ),
            }
        }
    }

    tracing::debug!(
        vat_items = tax.vat_items.len(),
        other_taxes = tax.other_taxes.len(),
        categories = map.len(),
        "tax totals reconciled"
    );
    (tax, map)
}

/// Tax rate of a line, or `None` when nothing on the line or in the
/// header map resolves it.
pub(crate) fn line_tax_rate(line: &InvoiceLine, map: &TaxPercentageMap) -> Option<Decimal> {
    if let Some(percent) = line.item.tax_category.as_ref().and_then(|c| c.percent) {
        return Some(percent);
    }

    let own_vat = line
        .tax_totals
        .iter()
        .flat_map(|t| t.subtotals.iter())
        .filter(|s| s.category.tax_scheme.value.trim() == VAT_SCHEME_ID)
        .find_map(resolve_percentage);
    if own_vat.is_some() {
        return own_vat;
    }

    line.item
        .tax_category
        .iter()
        .chain(line.tax_totals.iter().flat_map(|t| t.subtotals.iter().map(|s| &s.category)))
        .find_map(|category| map.get(&category.key()))
}
