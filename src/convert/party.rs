//! Party and postal address mapping.

use super::{Context, join_non_blank, non_blank};
use crate::core::{DiagnosticCode, VAT_SCHEME_ID};
use crate::ebinterface::{Address, AddressIdentifier, AddressIdentifierType, Country};
use crate::ubl::{Party, Person, PostalAddress};

/// Map a UBL party to an ebInterface address. `path` points at the
/// party element (e.g. "Invoice/AccountingSupplierParty/Party").
pub(crate) fn convert_party(ctx: &mut Context<'_>, party: &Party, path: &str) -> Address {
    let mut address = Address {
        address_identifier: address_identifier(ctx, party, path),
        ..Address::default()
    };

    let names: Vec<&str> = party
        .names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    match names.first() {
        Some(first) => {
            address.name = first.to_string();
            if names.len() > 1 {
                ctx.warn(
                    format!("{path}/PartyName[1]/Name"),
                    DiagnosticCode::MultiplePartyNames,
                    vec![first.to_string(), names.len().to_string()],
                );
            }
        }
        None => ctx.error(
            format!("{path}/PartyName/Name"),
            DiagnosticCode::MissingPartyName,
            vec![],
        ),
    }

    convert_postal_address(ctx, party.postal_address.as_ref(), &format!("{path}/PostalAddress"), &mut address);

    if let Some(contact) = &party.contact {
        address.phone = non_blank(contact.telephone.as_ref()).map(String::from);
        address.email = non_blank(contact.electronic_mail.as_ref()).map(String::from);
    }
    address.contact = party
        .persons
        .iter()
        .find_map(person_name)
        .or_else(|| {
            party
                .contact
                .as_ref()
                .and_then(|c| non_blank(c.name.as_ref()))
                .map(String::from)
        });

    address
}

/// Fill street, P.O. box, town, ZIP and country. Each missing mandatory
/// part is reported on its own.
pub(crate) fn convert_postal_address(
    ctx: &mut Context<'_>,
    postal: Option<&PostalAddress>,
    path: &str,
    address: &mut Address,
) {
    let Some(postal) = postal else {
        ctx.error(path, DiagnosticCode::MissingPostalAddress, vec![]);
        return;
    };

    let street_parts = [postal.street_name.as_ref(), postal.building_number.as_ref()];
    address.street = join_non_blank(street_parts.into_iter().flatten(), " ");
    address.po_box = non_blank(postal.postbox.as_ref()).map(String::from);
    if address.street.is_none() && address.po_box.is_none() {
        ctx.error(format!("{path}/StreetName"), DiagnosticCode::MissingStreet, vec![]);
    }

    match non_blank(postal.city_name.as_ref()) {
        Some(town) => address.town = town.to_string(),
        None => ctx.error(format!("{path}/CityName"), DiagnosticCode::MissingTown, vec![]),
    }

    match non_blank(postal.postal_zone.as_ref()) {
        Some(zip) => address.zip = zip.to_string(),
        None => ctx.error(format!("{path}/PostalZone"), DiagnosticCode::MissingZip, vec![]),
    }

    let country = postal.country.as_ref();
    let code = non_blank(country.and_then(|c| c.identification_code.as_ref()));
    let source_name = non_blank(country.and_then(|c| c.name.as_ref())).map(String::from);
    let code_path = format!("{path}/Country/IdentificationCode");
    address.country = match code {
        None => {
            ctx.error(code_path, DiagnosticCode::MissingCountry, vec![]);
            source_name.map(|name| Country {
                code: None,
                name: Some(name),
            })
        }
        Some(code) => {
            let code = code.to_ascii_uppercase();
            if ctx.code_lists.is_known_country(&code) {
                let name = source_name.or_else(|| {
                    ctx.code_lists
                        .country_name(&code, &ctx.settings.content_locale)
                });
                Some(Country {
                    code: Some(code),
                    name,
                })
            } else {
                ctx.error(code_path, DiagnosticCode::UnsupportedCountryCode, vec![code]);
                source_name.map(|name| Country {
                    code: None,
                    name: Some(name),
                })
            }
        }
    };
}

/// The endpoint id if its scheme is a known identifier type, else the
/// first matching party identification.
fn address_identifier(ctx: &mut Context<'_>, party: &Party, path: &str) -> Option<AddressIdentifier> {
    if let Some(endpoint) = party.endpoint_id.as_ref().filter(|e| !e.is_blank()) {
        if let Some(identifier_type) = endpoint.scheme().and_then(AddressIdentifierType::from_scheme) {
            return Some(AddressIdentifier {
                identifier_type,
                value: endpoint.value.trim().to_string(),
            });
        }
    }

    for (i, id) in party.identifications.iter().enumerate() {
        if id.is_blank() {
            continue;
        }
        match id.scheme().and_then(AddressIdentifierType::from_scheme) {
            Some(identifier_type) => {
                return Some(AddressIdentifier {
                    identifier_type,
                    value: id.value.trim().to_string(),
                });
            }
            None => ctx.warn(
                format!("{path}/PartyIdentification[{i}]/ID"),
                DiagnosticCode::IgnoredPartyIdentifier,
                vec![
                    id.value.trim().to_string(),
                    id.scheme().unwrap_or_default().to_string(),
                ],
            ),
        }
    }
    None
}

/// Title, first, middle, family name and suffix joined by single spaces.
fn person_name(person: &Person) -> Option<String> {
    let parts = [
        person.title.as_ref(),
        person.first_name.as_ref(),
        person.middle_name.as_ref(),
        person.family_name.as_ref(),
        person.name_suffix.as_ref(),
    ];
    join_non_blank(parts.into_iter().flatten(), " ")
}

/// VAT registration (`PartyTaxScheme` in the VAT scheme) of a party.
pub(crate) fn vat_id(party: &Party) -> Option<&str> {
    party
        .tax_schemes
        .iter()
        .filter(|s| {
            s.tax_scheme_id
                .as_deref()
                .is_some_and(|id| id.trim() == VAT_SCHEME_ID)
        })
        .find_map(|s| non_blank(s.company_id.as_ref()))
}
