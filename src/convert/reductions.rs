use rust_decimal::Decimal;

use crate::ebinterface::{ReductionAndSurchargeDetails, ReductionSurchargeItem, ReductionSurchargeKind};
use crate::ubl::AllowanceCharge;

/// Result of sign-normalising an allowance/charge block.
#[derive(Debug, Clone, PartialEq)]
pub struct SignNormalized {
    pub details: ReductionAndSurchargeDetails,
    /// Running base after the last entry was applied; `None` once it
    /// left the range of [`Decimal`].
    pub final_base: Option<Decimal>,
}

/// Turn mixed allowances and charges into one homogeneous list.
///
/// The first entry fixes the direction of the block. Entries whose
/// indicator disagrees get amount and percentage negated. Entries
/// without their own base amount use the running base, which starts at
/// `base` and is reduced (reduction block) or increased (surcharge block)
/// by every entry's normalised amount in source order. Once the running
/// base overflows, later entries without a base amount get zero.
///
/// Returns `None` for an empty block.
pub fn normalize_allowance_charges(
    entries: &[AllowanceCharge],
    base: Decimal,
    with_comments: bool,
) -> Option<SignNormalized> {
    let first = entries.first()?;
    let kind = if first.charge_indicator {
        ReductionSurchargeKind::Surcharge
    } else {
        ReductionSurchargeKind::Reduction
    };
    let is_surcharge_block = first.charge_indicator;

    let mut running = Some(base);
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let flip = entry.charge_indicator != is_surcharge_block;
        let amount = if flip { -entry.amount } else { entry.amount };
        let percentage = entry
            .multiplier_factor
            .map(|p| if flip { -p } else { p });
        let base_amount = entry.base_amount.or(running).unwrap_or(Decimal::ZERO);

        items.push(ReductionSurchargeItem {
            base_amount,
            percentage,
            amount,
            comment: if with_comments {
                super::join_non_blank(&entry.reasons, "\n")
            } else {
                None
            },
        });

        running = running.and_then(|r| {
            if is_surcharge_block {
                r.checked_add(amount)
            } else {
                r.checked_sub(amount)
            }
        });
    }

    Some(SignNormalized {
        details: ReductionAndSurchargeDetails { kind, items },
        final_base: running,
    })
}
