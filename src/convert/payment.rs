//! Payment method decision table and payment conditions.

use rust_decimal::Decimal;

use super::{
    Context, IBAN_MAX_LENGTH, PAYMENT_REFERENCE_MAX_LENGTH, join_non_blank, non_blank,
};
use crate::core::DiagnosticCode;
use crate::ebinterface::{
    BeneficiaryAccount, DirectDebit, Discount, NoPayment, PaymentConditions, PaymentMethod,
    UniversalBankTransaction,
};
use crate::ubl::{PaymentMeans, UblDocument};

/// UNCL 4461 codes mapped to a bank transfer.
pub const BANK_TRANSFER_CODES: &[&str] = &["30", "31", "42", "58"];
/// UNCL 4461 codes mapped to a direct debit.
pub const DIRECT_DEBIT_CODES: &[&str] = &["49", "59"];

/// Codes named when no payment means can be mapped.
const BANK_TRANSFER_HINT: &str = "31";
const DIRECT_DEBIT_HINT: &str = "49";

const CHANNEL_IBAN: &str = "IBAN";
const CHANNEL_BBAN: &str = "BBAN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeansKind {
    BankTransfer,
    DirectDebit,
}

fn classify(code: &str, direct_debit_supported: bool) -> Option<MeansKind> {
    if BANK_TRANSFER_CODES.contains(&code) {
        Some(MeansKind::BankTransfer)
    } else if direct_debit_supported && DIRECT_DEBIT_CODES.contains(&code) {
        Some(MeansKind::DirectDebit)
    } else {
        None
    }
}

/// Pick the payment method from the first payment means with a
/// supported code.
pub(crate) fn convert_payment_method(
    ctx: &mut Context<'_>,
    doc: &UblDocument,
    payable: Decimal,
) -> Option<PaymentMethod> {
    if doc.payment_means.is_empty() {
        if ctx.settings.strict {
            let field = ctx.path("PaymentMeans");
            ctx.error(field, DiagnosticCode::MissingPaymentMethod, vec![]);
        }
        return None;
    }

    let direct_debit = ctx.profile.direct_debit;
    let supported = doc.payment_means.iter().enumerate().find_map(|(i, means)| {
        non_blank(means.code.as_ref())
            .and_then(|code| classify(code, direct_debit))
            .map(|kind| (i, means, kind))
    });

    match supported {
        Some((i, means, MeansKind::BankTransfer)) => {
            Some(PaymentMethod::BankTransfer(bank_transfer(ctx, i, means)))
        }
        Some((_, means, MeansKind::DirectDebit)) => Some(PaymentMethod::DirectDebit(DirectDebit {
            comment: join_non_blank(&means.instruction_notes, "\n"),
        })),
        None if ctx.profile.no_payment && payable.is_zero() => {
            Some(PaymentMethod::NoPayment(NoPayment {
                comment: join_non_blank(&doc.payment_means[0].instruction_notes, "\n"),
            }))
        }
        None => {
            let code = non_blank(doc.payment_means[0].code.as_ref()).unwrap_or_default();
            let field = ctx.path("PaymentMeans[0]/PaymentMeansCode");
            let mut args = vec![code.to_string()];
            args.push(BANK_TRANSFER_HINT.to_string());
            if direct_debit {
                args.push(DIRECT_DEBIT_HINT.to_string());
            }
            ctx.error(field, DiagnosticCode::UnsupportedPaymentMeans, args);
            None
        }
    }
}

fn bank_transfer(ctx: &mut Context<'_>, index: usize, means: &PaymentMeans) -> UniversalBankTransaction {
    let base = ctx.path(&format!("PaymentMeans[{index}]"));
    let account = means.payee_financial_account.as_ref();
    let account_id = non_blank(account.and_then(|a| a.id.as_ref()));

    let beneficiary_account = match non_blank(means.payment_channel_code.as_ref()) {
        Some(channel) if channel != CHANNEL_IBAN && channel != CHANNEL_BBAN => {
            ctx.warn(
                format!("{base}/PaymentChannelCode"),
                DiagnosticCode::UnsupportedPaymentChannel,
                vec![channel.to_string(), CHANNEL_IBAN.to_string(), CHANNEL_BBAN.to_string()],
            );
            None
        }
        channel => match account_id {
            None => {
                ctx.warn(
                    format!("{base}/PayeeFinancialAccount/ID"),
                    DiagnosticCode::MissingPaymentAccount,
                    vec![],
                );
                None
            }
            Some(id) => {
                let (iban, bank_account_nr) = if channel == Some(CHANNEL_BBAN) {
                    (None, Some(id.to_string()))
                } else {
                    let iban = ctx.truncate(
                        format!("{base}/PayeeFinancialAccount/ID"),
                        DiagnosticCode::IbanTruncated,
                        id,
                        IBAN_MAX_LENGTH,
                    );
                    (Some(iban), None)
                };
                Some(BeneficiaryAccount {
                    bic: non_blank(account.and_then(|a| a.institution_id.as_ref())).map(String::from),
                    iban,
                    bank_account_nr,
                    owner: non_blank(account.and_then(|a| a.name.as_ref())).map(String::from),
                })
            }
        },
    };

    let payment_reference = means
        .payment_ids
        .iter()
        .enumerate()
        .find_map(|(j, id)| non_blank(Some(id)).map(|id| (j, id)))
        .map(|(j, id)| {
            ctx.truncate(
                format!("{base}/PaymentID[{j}]"),
                DiagnosticCode::PaymentReferenceTruncated,
                id,
                PAYMENT_REFERENCE_MAX_LENGTH,
            )
        });

    UniversalBankTransaction {
        beneficiary_account,
        payment_reference,
        comment: join_non_blank(&means.instruction_notes, "\n"),
    }
}

/// Due date, settlement discounts and the terms notes. `None` when the
/// document carries none of them.
pub(crate) fn convert_payment_conditions(
    ctx: &mut Context<'_>,
    doc: &UblDocument,
) -> Option<PaymentConditions> {
    let due_date = doc
        .due_date
        .or_else(|| doc.payment_means.iter().find_map(|m| m.payment_due_date));

    let mut discounts = Vec::new();
    for (i, terms) in doc.payment_terms.iter().enumerate() {
        if let Some(percentage) = terms.settlement_discount_percent {
            match terms.settlement_period_end {
                Some(payment_date) => discounts.push(Discount {
                    payment_date,
                    percentage,
                }),
                None => {
                    let field = ctx.path(&format!("PaymentTerms[{i}]/SettlementPeriod/EndDate"));
                    ctx.warn(field, DiagnosticCode::DiscountWithoutDate, vec![percentage.to_string()]);
                }
            }
        }
        if let Some(penalty) = terms.penalty_surcharge_percent {
            let field = ctx.path(&format!("PaymentTerms[{i}]/PenaltySurchargePercent"));
            ctx.warn(field, DiagnosticCode::PenaltyNotSupported, vec![penalty.to_string()]);
        }
    }

    let comment = join_non_blank(doc.payment_terms.iter().flat_map(|t| t.notes.iter()), "\n");

    if due_date.is_none() && discounts.is_empty() && comment.is_none() {
        return None;
    }
    if due_date.is_none() {
        let field = ctx.path("DueDate");
        ctx.error(field, DiagnosticCode::MissingPaymentDueDate, vec![]);
    }

    Some(PaymentConditions {
        due_date,
        discounts,
        comment,
    })
}
