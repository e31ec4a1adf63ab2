//! Digital-signature presence scanner
//!
//! Reports whether signature dictionaries appear in the file at all. It
//! deliberately says nothing about validity; that requires the issuing
//! certificate authority and is out of scope here.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::instrument;

use crate::report::{Finding, FindingCategory, Severity};

lazy_static! {
    static ref SIGNATURE_MARKER: Regex = Regex::new(r"/ByteRange\b|/Type\s*/Sig\b").unwrap();
}

#[instrument(skip(data))]
pub fn scan(data: &[u8]) -> Vec<Finding> {
    let count = SIGNATURE_MARKER.find_iter(data).count();
    let finding = if count == 0 {
        Finding::new(
            Severity::Info,
            FindingCategory::Signature,
            "No digital signature",
            "The document carries no digital-signature dictionary. Notable for \
             documents expected to be signed, such as court filings.",
        )
    } else {
        Finding::new(
            Severity::Info,
            FindingCategory::Signature,
            "Digital signature present",
            "Signature dictionary markers were found. Signature validity is not \
             verified by this engine and must be checked against the issuing \
             certificate authority out-of-band.",
        )
        .with_evidence(vec![format!("{} signature marker(s)", count)])
    };
    vec![finding]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_is_informational() {
        let findings = scan(b"%PDF-1.4 plain document %%EOF");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].title, "No digital signature");
        assert!(findings[0].evidence.is_empty());
    }

    #[test]
    fn test_presence_reports_count_and_caveat() {
        let findings = scan(b"<< /Type /Sig /ByteRange [0 1 2 3] /Contents <...> >>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "Digital signature present");
        assert!(findings[0].evidence[0].starts_with("2 "));
        assert!(findings[0].detail.contains("not verified"));
    }
}
