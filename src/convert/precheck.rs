use crate::core::{CodeLists, DiagnosticCode, Diagnostics};
use crate::ubl::{DocumentKind, INVOICE_TYPE_CODE_COMMERCIAL, UBL_VERSION_21, UblDocument};

use super::non_blank;

/// Check the document-level preconditions of a conversion.
///
/// Verifies the UBL version, the business process (`ProfileID`) and, for
/// invoices, the type code. Any error recorded here means the document
/// must not be converted. The document itself is not modified.
pub fn check_consistency(doc: &UblDocument, code_lists: &dyn CodeLists, diagnostics: &mut Diagnostics) {
    let root = doc.kind.root_element();

    match non_blank(doc.ubl_version_id.as_ref()) {
        None => diagnostics.error(
            format!("{root}/UBLVersionID"),
            DiagnosticCode::MissingUblVersion,
            vec![UBL_VERSION_21.to_string()],
        ),
        Some(version) if version != UBL_VERSION_21 => diagnostics.error(
            format!("{root}/UBLVersionID"),
            DiagnosticCode::UnsupportedUblVersion,
            vec![version.to_string(), UBL_VERSION_21.to_string()],
        ),
        Some(_) => {}
    }

    match non_blank(doc.profile_id.as_ref()) {
        None => diagnostics.error(
            format!("{root}/ProfileID"),
            DiagnosticCode::MissingProfileId,
            vec![],
        ),
        Some(profile) if !code_lists.is_known_process_id(profile) => diagnostics.error(
            format!("{root}/ProfileID"),
            DiagnosticCode::UnsupportedProfileId,
            vec![profile.to_string()],
        ),
        Some(_) => {}
    }

    if doc.kind == DocumentKind::Invoice {
        match non_blank(doc.type_code.as_ref()) {
            None => diagnostics.warn(
                format!("{root}/InvoiceTypeCode"),
                DiagnosticCode::MissingInvoiceTypeCode,
                vec![INVOICE_TYPE_CODE_COMMERCIAL.to_string()],
            ),
            Some(code) if code != INVOICE_TYPE_CODE_COMMERCIAL => diagnostics.error(
                format!("{root}/InvoiceTypeCode"),
                DiagnosticCode::UnsupportedInvoiceTypeCode,
                vec![code.to_string(), INVOICE_TYPE_CODE_COMMERCIAL.to_string()],
            ),
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Severity, StandardCodeLists};
    use crate::ubl::DocumentBuilder;
    use chrono::NaiveDate;

    fn doc() -> UblDocument {
        DocumentBuilder::invoice("1", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).build()
    }

    fn check(doc: &UblDocument) -> Diagnostics {
        let mut d = Diagnostics::new();
        check_consistency(doc, &StandardCodeLists, &mut d);
        d
    }

    #[test]
    fn builder_default_passes() {
        assert!(check(&doc()).is_empty());
    }

    #[test]
    fn wrong_ubl_version() {
        let mut doc = doc();
        doc.ubl_version_id = Some("2.0".into());
        let d = check(&doc);
        assert_eq!(d.len(), 1);
        assert_eq!(d.as_slice()[0].code, DiagnosticCode::UnsupportedUblVersion);
        assert_eq!(d.as_slice()[0].args, ["2.0", "2.1"]);
    }

    #[test]
    fn unknown_profile() {
        let mut doc = doc();
        doc.profile_id = Some("urn:example".into());
        let d = check(&doc);
        assert_eq!(d.as_slice()[0].code, DiagnosticCode::UnsupportedProfileId);
        assert_eq!(d.as_slice()[0].field, "Invoice/ProfileID");
    }

    #[test]
    fn missing_type_code_is_only_a_warning() {
        let mut doc = doc();
        doc.type_code = None;
        let d = check(&doc);
        assert_eq!(d.most_severe(), Some(Severity::Warning));
    }

    #[test]
    fn credit_notes_skip_type_code() {
        let mut doc =
            DocumentBuilder::credit_note("1", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).build();
        doc.type_code = Some("381".into());
        assert!(check(&doc).is_empty());
    }

    #[test]
    fn all_three_checks_report_independently() {
        let mut doc = doc();
        doc.ubl_version_id = None;
        doc.profile_id = None;
        doc.type_code = Some("381".into());
        let codes: Vec<_> = check(&doc).iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            [
                DiagnosticCode::MissingUblVersion,
                DiagnosticCode::MissingProfileId,
                DiagnosticCode::UnsupportedInvoiceTypeCode,
            ]
        );
    }
}
