use chrono::NaiveDate;
use ebconvert::convert::{Converter, convert};
use ebconvert::core::*;
use ebconvert::ebinterface::{DeliveryTime, EbInvoice, EbVersion, PaymentMethod};
use ebconvert::ubl::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn base() -> DocumentBuilder {
    DocumentBuilder::invoice("RE-2024-042", date(2024, 9, 1))
        .supplier(
            PartyBuilder::new("ACME GmbH")
                .address(AddressBuilder::new("Wien", "1010", "AT").street("Ring", "1").build())
                .vat_id("ATU12345678")
                .build(),
        )
        .customer(
            PartyBuilder::new("Kunde AG")
                .address(AddressBuilder::new("Graz", "8010", "AT").street("Hauptplatz", "1").build())
                .build(),
        )
        .vat_subtotal("S", dec!(100), dec!(20))
        .add_line(
            LineBuilder::new("1", "Wartung", dec!(100))
                .quantity(dec!(1), "C62")
                .vat("S", dec!(20))
                .build(),
        )
        .totals(dec!(100), dec!(120), dec!(120))
}

fn transfer(code: &str, iban: &str) -> PaymentMeans {
    PaymentMeans {
        code: Some(code.into()),
        payee_financial_account: Some(FinancialAccount {
            id: Some(iban.into()),
            name: Some("ACME GmbH".into()),
            institution_id: Some("BKAUATWW".into()),
        }),
        ..PaymentMeans::default()
    }
}

fn run(doc: &UblDocument, version: EbVersion) -> (EbInvoice, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let inv = convert(doc, version, &ConversionSettings::default(), &mut diagnostics)
        .unwrap()
        .unwrap();
    (inv, diagnostics)
}

fn codes(diagnostics: &Diagnostics) -> Vec<DiagnosticCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

// --- Payment method ---

#[test]
fn bank_transfer_with_iban() {
    let mut means = transfer("58", "AT611904300234573201");
    means.payment_ids = vec!["RE-2024-042".into()];
    means.instruction_notes = vec!["Bitte binnen 14 Tagen".into()];
    let (inv, diagnostics) = run(&base().payment_means(means).build(), EbVersion::V41);
    assert!(diagnostics.is_empty());

    let Some(PaymentMethod::BankTransfer(transfer)) = inv.payment_method else {
        panic!("expected bank transfer");
    };
    let account = transfer.beneficiary_account.unwrap();
    assert_eq!(account.iban.as_deref(), Some("AT611904300234573201"));
    assert_eq!(account.bic.as_deref(), Some("BKAUATWW"));
    assert_eq!(account.owner.as_deref(), Some("ACME GmbH"));
    assert_eq!(account.bank_account_nr, None);
    assert_eq!(transfer.payment_reference.as_deref(), Some("RE-2024-042"));
    assert_eq!(transfer.comment.as_deref(), Some("Bitte binnen 14 Tagen"));
}

#[test]
fn long_iban_and_reference_are_truncated() {
    let mut means = transfer("31", &"1".repeat(40));
    means.payment_ids = vec!["R".repeat(50)];
    let (inv, diagnostics) = run(&base().payment_means(means).build(), EbVersion::V41);

    let Some(PaymentMethod::BankTransfer(transfer)) = inv.payment_method else {
        panic!("expected bank transfer");
    };
    assert_eq!(transfer.beneficiary_account.unwrap().iban.unwrap().len(), 34);
    assert_eq!(transfer.payment_reference.unwrap().len(), 35);
    assert_eq!(
        codes(&diagnostics),
        [DiagnosticCode::IbanTruncated, DiagnosticCode::PaymentReferenceTruncated]
    );
    assert_eq!(diagnostics.as_slice()[0].args[1], "34");
    assert_eq!(diagnostics.as_slice()[1].args[1], "35");
    assert_eq!(
        diagnostics.as_slice()[1].field,
        "Invoice/PaymentMeans[0]/PaymentID[0]"
    );
}

#[test]
fn bban_channel_fills_account_number() {
    let mut means = transfer("30", "0234573201");
    means.payment_channel_code = Some("BBAN".into());
    let (inv, diagnostics) = run(&base().payment_means(means).build(), EbVersion::V40);
    assert!(diagnostics.is_empty());
    let Some(PaymentMethod::BankTransfer(transfer)) = inv.payment_method else {
        panic!("expected bank transfer");
    };
    let account = transfer.beneficiary_account.unwrap();
    assert_eq!(account.iban, None);
    assert_eq!(account.bank_account_nr.as_deref(), Some("0234573201"));
}

#[test]
fn unknown_channel_drops_account_with_warning() {
    let mut means = transfer("31", "AT611904300234573201");
    means.payment_channel_code = Some("SWIFT".into());
    let (inv, diagnostics) = run(&base().payment_means(means).build(), EbVersion::V41);
    let Some(PaymentMethod::BankTransfer(transfer)) = inv.payment_method else {
        panic!("expected bank transfer");
    };
    assert_eq!(transfer.beneficiary_account, None);
    assert_eq!(codes(&diagnostics), [DiagnosticCode::UnsupportedPaymentChannel]);
    assert_eq!(diagnostics.most_severe(), Some(Severity::Warning));
}

#[test]
fn first_supported_means_wins() {
    let cash = PaymentMeans {
        code: Some("10".into()),
        ..PaymentMeans::default()
    };
    let doc = base()
        .payment_means(cash)
        .payment_means(transfer("58", "AT611904300234573201"))
        .build();
    let (inv, diagnostics) = run(&doc, EbVersion::V41);
    assert!(matches!(inv.payment_method, Some(PaymentMethod::BankTransfer(_))));
    assert!(diagnostics.is_empty());
}

#[test]
fn direct_debit_needs_version_40() {
    let debit = PaymentMeans {
        code: Some("59".into()),
        instruction_notes: vec!["SEPA-Lastschrift".into()],
        ..PaymentMeans::default()
    };
    let doc = base().payment_means(debit).build();

    let (v41, diagnostics) = run(&doc, EbVersion::V41);
    let Some(PaymentMethod::DirectDebit(debit)) = v41.payment_method else {
        panic!("expected direct debit");
    };
    assert_eq!(debit.comment.as_deref(), Some("SEPA-Lastschrift"));
    assert!(diagnostics.is_empty());

    let (v30, diagnostics) = run(&doc, EbVersion::V30);
    assert_eq!(v30.payment_method, None);
    assert_eq!(codes(&diagnostics), [DiagnosticCode::UnsupportedPaymentMeans]);
    assert_eq!(diagnostics.as_slice()[0].args, ["59", "31"]);
}

#[test]
fn unsupported_code_with_zero_payable_is_no_payment() {
    let cash = PaymentMeans {
        code: Some("10".into()),
        ..PaymentMeans::default()
    };
    let doc = base()
        .totals(dec!(100), dec!(120), dec!(0))
        .prepaid(dec!(120))
        .payment_means(cash)
        .build();

    let (v40, diagnostics) = run(&doc, EbVersion::V40);
    assert!(matches!(v40.payment_method, Some(PaymentMethod::NoPayment(_))));
    assert!(diagnostics.is_empty());

    let (v30, diagnostics) = run(&doc, EbVersion::V30);
    assert_eq!(v30.payment_method, None);
    assert_eq!(codes(&diagnostics), [DiagnosticCode::UnsupportedPaymentMeans]);
    assert_eq!(diagnostics.as_slice()[0].args, ["10", "31"]);
}

#[test]
fn supported_codes_named_per_version() {
    let cash = PaymentMeans {
        code: Some("10".into()),
        ..PaymentMeans::default()
    };
    let doc = base().payment_means(cash).build();
    for (version, expected) in [
        (EbVersion::V30, vec!["10", "31"]),
        (EbVersion::V40, vec!["10", "31", "49"]),
        (EbVersion::V41, vec!["10", "31", "49"]),
    ] {
        let (_, diagnostics) = run(&doc, version);
        assert_eq!(codes(&diagnostics), [DiagnosticCode::UnsupportedPaymentMeans]);
        assert_eq!(diagnostics.as_slice()[0].args, expected, "{version}");
    }
}

// --- Payment conditions ---

#[test]
fn conditions_from_terms() {
    let doc = base()
        .due_date(date(2024, 10, 1))
        .payment_terms(PaymentTerms {
            notes: vec!["30 Tage netto".into()],
            settlement_discount_percent: Some(dec!(2)),
            settlement_period_end: Some(date(2024, 9, 15)),
            penalty_surcharge_percent: None,
        })
        .build();
    let (inv, diagnostics) = run(&doc, EbVersion::V41);
    assert!(diagnostics.is_empty());
    let conditions = inv.payment_conditions.unwrap();
    assert_eq!(conditions.due_date, Some(date(2024, 10, 1)));
    assert_eq!(conditions.discounts.len(), 1);
    assert_eq!(conditions.discounts[0].payment_date, date(2024, 9, 15));
    assert_eq!(conditions.discounts[0].percentage, dec!(2));
    assert_eq!(conditions.comment.as_deref(), Some("30 Tage netto"));
}

#[test]
fn due_date_from_payment_means() {
    let mut means = transfer("58", "AT611904300234573201");
    means.payment_due_date = Some(date(2024, 9, 30));
    let (inv, _) = run(&base().payment_means(means).build(), EbVersion::V41);
    assert_eq!(inv.payment_conditions.unwrap().due_date, Some(date(2024, 9, 30)));
}

#[test]
fn unusable_terms_are_reported() {
    let doc = base()
        .payment_terms(PaymentTerms {
            settlement_discount_percent: Some(dec!(3)),
            ..PaymentTerms::default()
        })
        .payment_terms(PaymentTerms {
            notes: vec!["Verzugszinsen".into()],
            penalty_surcharge_percent: Some(dec!(9.2)),
            ..PaymentTerms::default()
        })
        .build();
    let (inv, diagnostics) = run(&doc, EbVersion::V41);
    assert_eq!(
        codes(&diagnostics),
        [
            DiagnosticCode::DiscountWithoutDate,
            DiagnosticCode::PenaltyNotSupported,
            DiagnosticCode::MissingPaymentDueDate,
        ]
    );
    let conditions = inv.payment_conditions.unwrap();
    assert!(conditions.discounts.is_empty());
    assert_eq!(conditions.due_date, None);
}

#[test]
fn no_conditions_without_data() {
    let (inv, _) = run(&base().build(), EbVersion::V41);
    assert_eq!(inv.payment_conditions, None);
}

// --- Delivery ---

#[test]
fn explicit_delivery_date_beats_period() {
    let doc = base()
        .invoice_period(Some(date(2024, 8, 1)), Some(date(2024, 8, 31)))
        .delivery(Delivery::default())
        .delivery(Delivery {
            actual_delivery_date: Some(date(2024, 8, 20)),
            location_address: Some(AddressBuilder::new("Salzburg", "5020", "AT").street("Getreidegasse", "9").build()),
            party_name: None,
        })
        .build();
    let (inv, diagnostics) = run(&doc, EbVersion::V41);
    assert!(diagnostics.is_empty());
    let delivery = inv.delivery.unwrap();
    assert_eq!(delivery.time, DeliveryTime::Date(date(2024, 8, 20)));
    let address = delivery.address.unwrap();
    assert_eq!(address.name, "Kunde AG");
    assert_eq!(address.town, "Salzburg");
}

#[test]
fn period_becomes_delivery() {
    let doc = base()
        .invoice_period(Some(date(2024, 8, 1)), Some(date(2024, 8, 31)))
        .build();
    let (inv, _) = run(&doc, EbVersion::V41);
    assert_eq!(
        inv.delivery.unwrap().time,
        DeliveryTime::Period {
            from: date(2024, 8, 1),
            to: date(2024, 8, 31),
        }
    );
}

#[test]
fn period_start_only_collapses_to_date() {
    let doc = base().invoice_period(Some(date(2024, 8, 1)), None).build();
    let (inv, _) = run(&doc, EbVersion::V41);
    assert_eq!(inv.delivery.unwrap().time, DeliveryTime::Date(date(2024, 8, 1)));
}

#[test]
fn strict_mode_requires_delivery() {
    let doc = base().payment_means(transfer("58", "AT611904300234573201")).build();
    let mut diagnostics = Diagnostics::new();
    let inv = Converter::new(EbVersion::V41, &StandardCodeLists)
        .with_settings(ConversionSettings::strict())
        .convert(&doc, &mut diagnostics)
        .unwrap()
        .unwrap();
    assert_eq!(inv.delivery, None);
    assert_eq!(codes(&diagnostics), [DiagnosticCode::MissingDelivery]);
    assert_eq!(diagnostics.as_slice()[0].field, "Invoice/Delivery/ActualDeliveryDate");
}
