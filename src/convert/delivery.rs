use super::party::convert_postal_address;
use super::{Context, non_blank};
use crate::core::DiagnosticCode;
use crate::ebinterface::{Address, Delivery, DeliveryTime};
use crate::ubl::UblDocument;

/// Document delivery: the first delivery with an actual date, else the
/// first invoice period with a start date.
pub(crate) fn convert_delivery(ctx: &mut Context<'_>, doc: &UblDocument) -> Option<Delivery> {
    let explicit = doc
        .deliveries
        .iter()
        .enumerate()
        .find_map(|(i, d)| d.actual_delivery_date.map(|date| (i, d, date)));

    if let Some((i, delivery, date)) = explicit {
        let address = delivery.location_address.as_ref().map(|postal| {
            let mut address = Address {
                name: non_blank(delivery.party_name.as_ref())
                    .or_else(|| customer_name(doc))
                    .unwrap_or_default()
                    .to_string(),
                ..Address::default()
            };
            let path = ctx.path(&format!("Delivery[{i}]/DeliveryLocation/Address"));
            convert_postal_address(ctx, Some(postal), &path, &mut address);
            address
        });
        return Some(Delivery {
            time: DeliveryTime::Date(date),
            address,
        });
    }

    let period = doc.invoice_periods.iter().find_map(|p| match (p.start_date, p.end_date) {
        (Some(from), Some(to)) => Some(DeliveryTime::Period { from, to }),
        (Some(from), None) => Some(DeliveryTime::Date(from)),
        (None, _) => None,
    });
    if let Some(time) = period {
        return Some(Delivery {
            time,
            address: None,
        });
    }

    if ctx.settings.strict {
        let field = ctx.path("Delivery/ActualDeliveryDate");
        ctx.error(field, DiagnosticCode::MissingDelivery, vec![]);
    }
    None
}

fn customer_name(doc: &UblDocument) -> Option<&str> {
    doc.customer
        .as_ref()?
        .names
        .iter()
        .map(|n| n.trim())
        .find(|n| !n.is_empty())
}
