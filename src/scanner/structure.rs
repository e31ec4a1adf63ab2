//! Structural scanner
//!
//! Scans the raw bytes for revision boundaries, data appended past the
//! logical end of the file, inline script markers, and embedded files.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::report::{Finding, FindingCategory, Severity};
use crate::utils::{count_occurrences, excerpt, printable_len, rfind, trim_bytes};

const EOF_MARKER: &[u8] = b"%%EOF";

lazy_static! {
    // `/JS` only counts when not followed by an identifier character, so
    // `/JavaScript` is not counted twice.
    static ref SCRIPT_MARKER: Regex = Regex::new(r"/JavaScript|/JS\b").unwrap();
    static ref EMBEDDED_FILE_MARKER: Regex = Regex::new(r"/EmbeddedFiles?\b|/Filespec\b").unwrap();
}

/// Structural scan output: findings plus the raw `%%EOF` marker count the
/// assembler turns into the revision count.
#[derive(Debug, Default)]
pub struct StructuralScan {
    pub findings: Vec<Finding>,
    pub eof_marker_count: usize,
}

#[instrument(skip(data, config), fields(size = data.len()))]
pub fn scan(data: &[u8], config: &EngineConfig) -> StructuralScan {
    let mut findings = Vec::new();

    let eof_marker_count = count_occurrences(data, EOF_MARKER);
    debug!(eof_marker_count, "structural scan");

    if eof_marker_count > 1 {
        findings.push(
            Finding::new(
                Severity::Medium,
                FindingCategory::Structure,
                "Multiple document revisions",
                format!(
                    "The file contains {} end-of-file markers, meaning multiple \
                     cross-reference tables from incremental saves. Earlier revisions \
                     may still hold superseded or deleted content.",
                    eof_marker_count
                ),
            )
            .with_evidence(vec![format!("{} %%EOF markers found", eof_marker_count)]),
        );
    }

    if let Some(finding) = detect_trailing_data(data, config) {
        findings.push(finding);
    }

    let script_count = SCRIPT_MARKER.find_iter(data).count();
    if script_count > 0 {
        findings.push(
            Finding::new(
                Severity::High,
                FindingCategory::Structure,
                "Embedded JavaScript",
                "The document declares JavaScript actions. Scripts in a PDF can \
                 alter displayed content or execute on open.",
            )
            .with_evidence(vec![format!("{} script marker(s)", script_count)]),
        );
    }

    let embedded_count = EMBEDDED_FILE_MARKER.find_iter(data).count();
    if embedded_count > 0 {
        findings.push(
            Finding::new(
                Severity::Medium,
                FindingCategory::Structure,
                "Embedded files",
                "The document declares embedded file attachments, which can carry \
                 payloads invisible to normal viewing.",
            )
            .with_evidence(vec![format!("{} embedded-file marker(s)", embedded_count)]),
        );
    }

    StructuralScan {
        findings,
        eof_marker_count,
    }
}

/// Bytes after the last `%%EOF` are never rendered. Anything non-trivial
/// back there is a hiding spot.
fn detect_trailing_data(data: &[u8], config: &EngineConfig) -> Option<Finding> {
    let last = rfind(data, EOF_MARKER)?;
    let trailing = &data[last + EOF_MARKER.len()..];
    if trailing.len() <= config.trailing_byte_threshold {
        return None;
    }
    let trimmed = trim_bytes(trailing);
    if printable_len(trimmed) <= config.trailing_printable_threshold {
        return None;
    }
    let preview = excerpt(
        &String::from_utf8_lossy(trimmed),
        config.evidence_excerpt_len,
    );
    Some(
        Finding::new(
            Severity::High,
            FindingCategory::Structure,
            "Data after end of file",
            "Content was appended after the document's logical end marker. It is \
             never rendered but may carry a hidden payload.",
        )
        .with_evidence(vec![
            format!("{} bytes after final %%EOF marker", trailing.len()),
            format!("trailing content preview: {}", preview),
        ]),
    )
}
