use chrono::NaiveDate;
use ebconvert::convert::convert;
use ebconvert::core::*;
use ebconvert::ebinterface::{ArticleNumberKind, DeliveryTime, EbVersion, ListLineItem, ReductionSurchargeKind};
use ebconvert::ubl::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn base() -> DocumentBuilder {
    DocumentBuilder::invoice("RE-7", date(2024, 2, 29))
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
        .vat_subtotal("S", dec!(100), dec!(21))
        .totals(dec!(100), dec!(121), dec!(121))
}

fn convert_lines(doc: &UblDocument, version: EbVersion) -> (Vec<ListLineItem>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let inv = convert(doc, version, &ConversionSettings::default(), &mut diagnostics)
        .unwrap()
        .unwrap();
    (inv.details.items, diagnostics)
}

fn codes(diagnostics: &Diagnostics) -> Vec<DiagnosticCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn missing_quantity_defaults_with_two_warnings() {
    let doc = base()
        .add_line(LineBuilder::new("1", "Beratung", dec!(100)).vat("S", dec!(21)).build())
        .build();
    let (items, diagnostics) = convert_lines(&doc, EbVersion::V41);
    let item = &items[0];
    assert_eq!(item.quantity.value, Decimal::ONE);
    assert_eq!(item.quantity.unit, DEFAULT_UNIT_CODE);
    assert_eq!(item.unit_price, dec!(100));
    assert_eq!(
        codes(&diagnostics),
        [DiagnosticCode::UnitCodeDefaulted, DiagnosticCode::QuantityDefaulted]
    );
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
}

#[test]
fn header_percentage_is_reused_by_lines() {
    let doc = base()
        .add_line(
            LineBuilder::new("1", "Ware", dec!(100))
                .quantity(dec!(4), "C62")
                .tax_category(vat_category("S", None))
                .build(),
        )
        .build();
    let (items, diagnostics) = convert_lines(&doc, EbVersion::V41);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(items[0].tax_rate, dec!(21.00));
    assert_eq!(items[0].unit_price, dec!(25));
}

#[test]
fn line_without_any_tax_category_defaults_to_zero() {
    let doc = base()
        .add_line(LineBuilder::new("1", "Ware", dec!(100)).quantity(dec!(1), "C62").build())
        .build();
    let (items, diagnostics) = convert_lines(&doc, EbVersion::V41);
    assert_eq!(items[0].tax_rate, Decimal::ZERO);
    assert_eq!(codes(&diagnostics), [DiagnosticCode::LineTaxRateDefaulted]);
    assert_eq!(diagnostics.as_slice()[0].field, "Invoice/InvoiceLine[0]/Item/ClassifiedTaxCategory");
}

#[test]
fn line_own_vat_subtotal_is_used() {
    let mut line = LineBuilder::new("1", "Ware", dec!(100)).quantity(dec!(1), "C62").build();
    line.tax_totals.push(TaxTotal {
        tax_amount: Some(dec!(10)),
        subtotals: vec![TaxSubtotal {
            taxable_amount: Some(dec!(100)),
            tax_amount: dec!(10),
            category: vat_category("AA", None),
        }],
    });
    let (items, diagnostics) = convert_lines(&base().add_line(line).build(), EbVersion::V41);
    assert!(diagnostics.is_empty());
    assert_eq!(items[0].tax_rate, dec!(10));
}

#[test]
fn invalid_position_falls_back_to_index() {
    let doc = base()
        .add_line(LineBuilder::new("1", "A", dec!(50)).quantity(dec!(1), "C62").vat("S", dec!(21)).build())
        .add_line(LineBuilder::new("A-2", "B", dec!(50)).quantity(dec!(1), "C62").vat("S", dec!(21)).build())
        .build();
    let (items, diagnostics) = convert_lines(&doc, EbVersion::V41);
    assert_eq!(items[0].position_number, 1);
    assert_eq!(items[1].position_number, 2);
    assert_eq!(codes(&diagnostics), [DiagnosticCode::InvalidLinePosition]);
    assert_eq!(diagnostics.as_slice()[0].args, ["A-2", "2"]);
    assert_eq!(diagnostics.as_slice()[0].field, "Invoice/InvoiceLine[1]/ID");
}

#[test]
fn descriptions_fall_back_to_item_name() {
    let doc = base()
        .add_line(LineBuilder::new("1", "Name", dec!(50)).quantity(dec!(1), "C62").vat("S", dec!(21)).build())
        .add_line(
            LineBuilder::new("2", "Name", dec!(50))
                .quantity(dec!(1), "C62")
                .vat("S", dec!(21))
                .description("Erste")
                .description("Zweite")
                .build(),
        )
        .build();
    let (items, _) = convert_lines(&doc, EbVersion::V41);
    assert_eq!(items[0].descriptions, ["Name"]);
    assert_eq!(items[1].descriptions, ["Erste", "Zweite"]);
}

#[test]
fn unknown_unit_is_kept_with_warning() {
    let doc = base()
        .add_line(LineBuilder::new("1", "Ware", dec!(100)).quantity(dec!(2), "XYZ").vat("S", dec!(21)).build())
        .build();
    let (items, diagnostics) = convert_lines(&doc, EbVersion::V41);
    assert_eq!(items[0].quantity.unit, "XYZ");
    assert_eq!(codes(&diagnostics), [DiagnosticCode::UnknownUnitCode]);
}

#[test]
fn line_amount_is_taken_verbatim() {
    let doc = base()
        .add_line(
            LineBuilder::new("1", "Ware", dec!(33.33))
                .quantity(dec!(3), "C62")
                .price(dec!(11.11), None)
                .vat("S", dec!(21))
                .build(),
        )
        .build();
    let (items, _) = convert_lines(&doc, EbVersion::V41);
    assert_eq!(items[0].unit_price, dec!(11.11));
    assert_eq!(items[0].line_item_amount, dec!(33.33));
}

#[test]
fn missing_line_amount_is_an_error() {
    let mut line = LineBuilder::new("1", "Ware", dec!(0))
        .quantity(dec!(2), "C62")
        .price(dec!(5), None)
        .vat("S", dec!(21))
        .build();
    line.line_extension_amount = None;
    let (items, diagnostics) = convert_lines(&base().add_line(line).build(), EbVersion::V41);
    assert_eq!(items[0].line_item_amount, Decimal::ZERO);
    assert_eq!(items[0].unit_price, dec!(5));
    assert_eq!(codes(&diagnostics), [DiagnosticCode::MissingLineAmount]);
    assert_eq!(diagnostics.most_severe(), Some(Severity::Error));
}

#[test]
fn order_line_reference_falls_back_to_header_order() {
    let doc = base()
        .order_reference("PO-100")
        .add_line(
            LineBuilder::new("1", "A", dec!(50))
                .quantity(dec!(1), "C62")
                .vat("S", dec!(21))
                .order_line_reference(" ", Some("PO-999".into()))
                .order_line_reference("7", None)
                .build(),
        )
        .add_line(
            LineBuilder::new("2", "B", dec!(50))
                .quantity(dec!(1), "C62")
                .vat("S", dec!(21))
                .order_line_reference("8", Some("PO-200".into()))
                .build(),
        )
        .add_line(LineBuilder::new("3", "C", dec!(0)).quantity(dec!(1), "C62").vat("S", dec!(21)).build())
        .build();
    let (items, diagnostics) = convert_lines(&doc, EbVersion::V41);
    assert!(diagnostics.is_empty());

    let first = items[0].order_reference.as_ref().unwrap();
    assert_eq!(first.order_id, "PO-100");
    assert_eq!(first.order_position_number.as_deref(), Some("7"));

    let second = items[1].order_reference.as_ref().unwrap();
    assert_eq!(second.order_id, "PO-200");

    assert_eq!(items[2].order_reference, None);
}

#[test]
fn line_reductions_use_quantity_times_price() {
    let doc = base()
        .add_line(
            LineBuilder::new("1", "Ware", dec!(95))
                .quantity(dec!(2), "C62")
                .price(dec!(50), None)
                .vat("S", dec!(21))
                .add_allowance_charge(allowance(dec!(10)))
                .add_allowance_charge(charge(dec!(5)))
                .build(),
        )
        .build();
    let (items, _) = convert_lines(&doc, EbVersion::V41);
    let block = items[0].reduction_and_surcharge.as_ref().unwrap();
    assert_eq!(block.kind, ReductionSurchargeKind::Reduction);
    assert_eq!(block.items[0].base_amount, dec!(100));
    assert_eq!(block.items[1].base_amount, dec!(90));
    assert_eq!(block.items[1].amount, dec!(-5));
}

#[test]
fn line_reduction_overflow_is_an_error() {
    let doc = base()
        .add_line(
            LineBuilder::new("1", "Ware", dec!(50))
                .quantity(Decimal::MAX, "C62")
                .price(dec!(2), None)
                .vat("S", dec!(21))
                .add_allowance_charge(allowance(dec!(1)))
                .build(),
        )
        .add_line(
            LineBuilder::new("2", "Ware", dec!(50))
                .quantity(dec!(1), "C62")
                .price(Decimal::MAX, None)
                .vat("S", dec!(21))
                .add_allowance_charge(charge(dec!(1)))
                .build(),
        )
        .build();
    let (items, diagnostics) = convert_lines(&doc, EbVersion::V41);
    assert_eq!(items.len(), 2);
    let first = items[0].reduction_and_surcharge.as_ref().unwrap();
    assert_eq!(first.items[0].base_amount, Decimal::ZERO);
    assert_eq!(
        codes(&diagnostics),
        [DiagnosticCode::AmountOverflow, DiagnosticCode::AmountOverflow]
    );
    assert_eq!(diagnostics.as_slice()[0].field, "Invoice/InvoiceLine[0]/Price");
    assert_eq!(diagnostics.as_slice()[1].field, "Invoice/InvoiceLine[1]/AllowanceCharge");
    assert!(diagnostics.has_errors());
}

#[test]
fn article_numbers_are_mapped() {
    let mut line = LineBuilder::new("1", "Ware", dec!(10))
        .quantity(dec!(1), "C62")
        .vat("S", dec!(21))
        .sellers_item_id("ART-1")
        .build();
    line.item.buyers_item_id = Some("KD-9".into());
    let (items, _) = convert_lines(&base().add_line(line).build(), EbVersion::V41);
    let kinds: Vec<_> = items[0].article_numbers.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, [ArticleNumberKind::SellersArticleNumber, ArticleNumberKind::BuyersArticleNumber]);
}

#[test]
fn line_delivery_from_version_40() {
    let mut line = LineBuilder::new("1", "Ware", dec!(10)).quantity(dec!(1), "C62").vat("S", dec!(21)).build();
    line.deliveries.push(Delivery::default());
    line.deliveries.push(Delivery {
        actual_delivery_date: Some(date(2024, 2, 20)),
        ..Delivery::default()
    });
    let doc = base().add_line(line).build();

    let (v30, _) = convert_lines(&doc, EbVersion::V30);
    assert_eq!(v30[0].delivery, None);

    let (v40, _) = convert_lines(&doc, EbVersion::V40);
    let delivery = v40[0].delivery.as_ref().unwrap();
    assert_eq!(delivery.time, DeliveryTime::Date(date(2024, 2, 20)));
}
