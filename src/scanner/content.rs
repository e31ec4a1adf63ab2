//! Content-stream scanner
//!
//! Pattern-matches rendering-command sequences that hide or disguise
//! content: white-on-white text, sub-pixel font sizes, and opaque black
//! rectangles consistent with fake redaction.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::instrument;

use crate::config::EngineConfig;
use crate::report::{Finding, FindingCategory, Severity};
use crate::scanner::ContentSource;

lazy_static! {
    // White non-stroking fill set shortly before a text-drawing operator.
    static ref WHITE_FILL_TEXT: Regex = Regex::new(
        r"(?s)(?:^|[^\d.])1(?:\.0+)?\s+1(?:\.0+)?\s+1(?:\.0+)?\s+rg\b.{0,120}?(?:BT|Tj|TJ)"
    )
    .unwrap();

    // Any font-size selection; sizes are filtered afterwards.
    static ref SET_FONT_SIZE: Regex =
        Regex::new(r"/[A-Za-z0-9]+\s+(\d*\.?\d+)\s+Tf\b").unwrap();

    // Black fill followed shortly by a filled rectangle.
    static ref BLACK_FILL_RECT: Regex = Regex::new(
        r"(?s)(?:^|[^\d.])0(?:\.0+)?\s+0(?:\.0+)?\s+0(?:\.0+)?\s+rg\b.{0,120}?re\s+f\b"
    )
    .unwrap();
}

#[instrument(skip(source, config))]
pub fn scan(source: &dyn ContentSource, config: &EngineConfig) -> Vec<Finding> {
    let data = source.bytes();
    let mut findings = Vec::new();

    let invisible_count = WHITE_FILL_TEXT.find_iter(data).count();
    if invisible_count > 0 {
        findings.push(
            Finding::new(
                Severity::Critical,
                FindingCategory::Content,
                "Invisible text (white-on-white)",
                "The content stream sets a white fill color immediately before \
                 drawing text. White-on-white text is a classic technique for \
                 hiding content from a reader while keeping it extractable.",
            )
            .with_evidence(vec![format!(
                "{} occurrence(s) of white fill before text drawing",
                invisible_count
            )]),
        );
    }

    let micro_sizes: Vec<f64> = SET_FONT_SIZE
        .captures_iter(data)
        .filter_map(|caps| {
            std::str::from_utf8(caps.get(1)?.as_bytes())
                .ok()?
                .parse::<f64>()
                .ok()
        })
        .filter(|size| *size > 0.0 && *size < 1.0)
        .collect();
    if !micro_sizes.is_empty() {
        let listed: Vec<String> = micro_sizes
            .iter()
            .take(config.max_reported_font_sizes)
            .map(|size| format!("font size {}", size))
            .collect();
        findings.push(
            Finding::new(
                Severity::High,
                FindingCategory::Content,
                "Microscopic text",
                format!(
                    "{} text command(s) select a font size below one unit. Text at \
                     sub-pixel size renders invisibly at normal zoom.",
                    micro_sizes.len()
                ),
            )
            .with_evidence(listed),
        );
    }

    let redaction_count = BLACK_FILL_RECT.find_iter(data).count();
    if redaction_count > 0 {
        findings.push(
            Finding::new(
                Severity::Critical,
                FindingCategory::Content,
                "Possible fake redaction",
                "The content stream draws black filled rectangles. An opaque \
                 overlay does not remove the text beneath it; extract the text \
                 under each rectangle to confirm whether it was actually redacted.",
            )
            .with_evidence(vec![format!(
                "{} black rectangle overlay(s)",
                redaction_count
            )]),
        );
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::RawContent;

    fn scan_bytes(data: &[u8]) -> Vec<Finding> {
        scan(&RawContent::new(data), &EngineConfig::default())
    }

    #[test]
    fn test_white_text_single_occurrence() {
        let findings = scan_bytes(b"stream\n1 1 1 rg BT /F1 12 Tf (hidden) Tj ET\nendstream");
        let finding = findings
            .iter()
            .find(|f| f.title.starts_with("Invisible text"))
            .expect("invisible-text finding");
        assert_eq!(finding.severity, Severity::Critical);
        assert!(finding.evidence[0].starts_with("1 occurrence"));
    }

    #[test]
    fn test_white_fill_without_text_ignored() {
        let findings = scan_bytes(b"1 1 1 rg 0 0 612 792 re W n");
        assert!(findings.iter().all(|f| !f.title.starts_with("Invisible")));
    }

    #[test]
    fn test_rgb_triplet_boundary_not_confused() {
        // `11 1 1 rg` is not a white fill
        let findings = scan_bytes(b"11 1 1 rg BT (x) Tj ET");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_micro_font_sizes_collected() {
        let findings =
            scan_bytes(b"BT /F1 0.5 Tf (a) Tj /F2 12 Tf (b) Tj /F3 0.01 Tf (c) Tj ET");
        let finding = findings
            .iter()
            .find(|f| f.title == "Microscopic text")
            .expect("micro-text finding");
        assert_eq!(finding.severity, Severity::High);
        assert_eq!(finding.evidence.len(), 2);
        assert!(finding.evidence[0].contains("0.5"));
        assert!(finding.evidence[1].contains("0.01"));
    }

    #[test]
    fn test_zero_and_one_are_excluded() {
        let findings = scan_bytes(b"BT /F1 0 Tf (a) Tj /F2 1 Tf (b) Tj ET");
        assert!(findings.iter().all(|f| f.title != "Microscopic text"));
    }

    #[test]
    fn test_micro_font_evidence_capped_at_ten() {
        let mut data = Vec::new();
        for i in 1..=15 {
            data.extend_from_slice(format!("/F{} 0.{} Tf ", i, i).as_bytes());
        }
        let findings = scan_bytes(&data);
        let finding = findings
            .iter()
            .find(|f| f.title == "Microscopic text")
            .unwrap();
        assert_eq!(finding.evidence.len(), 10);
    }

    #[test]
    fn test_fake_redaction_detected() {
        let findings = scan_bytes(b"0 0 0 rg 100 600 200 20 re f");
        let finding = findings
            .iter()
            .find(|f| f.title == "Possible fake redaction")
            .expect("redaction finding");
        assert_eq!(finding.severity, Severity::Critical);
        assert!(finding.evidence[0].starts_with("1 "));
    }

    #[test]
    fn test_black_fill_without_rect_ignored() {
        let findings = scan_bytes(b"0 0 0 rg BT (normal black text) Tj ET");
        assert!(findings
            .iter()
            .all(|f| f.title != "Possible fake redaction"));
    }

    #[test]
    fn test_clean_stream_yields_nothing() {
        let findings = scan_bytes(b"BT /F1 12 Tf (ordinary page) Tj ET");
        assert!(findings.is_empty());
    }
}
