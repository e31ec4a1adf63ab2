//! Tool-fingerprint analyzer
//!
//! Cross-references metadata values against the known-tool catalog, flags
//! multi-tool provenance, and checks creator/producer consistency.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::analyzer::catalog::TOOL_CATALOG;
use crate::config::EngineConfig;
use crate::report::{Finding, FindingCategory, Severity};
use crate::utils::excerpt;

/// Decides whether a creator and producer value describe consistent
/// provenance. The default is mutual case-insensitive substring
/// containment — a crude heuristic with known false positives, isolated
/// here so a curated equivalence table can replace it.
pub trait ProvenanceHeuristic: Send + Sync {
    fn consistent(&self, creator: &str, producer: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct SubstringHeuristic;

impl ProvenanceHeuristic for SubstringHeuristic {
    fn consistent(&self, creator: &str, producer: &str) -> bool {
        let creator = creator.to_lowercase();
        let producer = producer.to_lowercase();
        creator.contains(&producer) || producer.contains(&creator)
    }
}

#[instrument(skip(metadata, heuristic, config), fields(fields = metadata.len()))]
pub fn analyze(
    metadata: &BTreeMap<String, String>,
    heuristic: &dyn ProvenanceHeuristic,
    config: &EngineConfig,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut detected_tools: Vec<&'static str> = Vec::new();

    for (field, value) in metadata {
        let lowered = value.to_lowercase();
        for tool in TOOL_CATALOG {
            if !lowered.contains(tool.name) {
                continue;
            }
            if !detected_tools.contains(&tool.name) {
                detected_tools.push(tool.name);
            }
            findings.push(
                Finding::new(
                    Severity::Medium,
                    FindingCategory::Metadata,
                    format!("Editing tool detected: {}", tool.name),
                    format!("{} — fingerprint found in metadata field '{}'.", tool.description, field),
                )
                .with_evidence(vec![format!(
                    "{} = {}",
                    field,
                    excerpt(value, config.evidence_excerpt_len)
                )]),
            );
        }
    }

    debug!(distinct_tools = detected_tools.len(), "tool fingerprint scan");

    if detected_tools.len() > config.multi_tool_threshold {
        findings.insert(
            0,
            Finding::new(
                Severity::High,
                FindingCategory::Metadata,
                "Multiple creation tools",
                format!(
                    "{} distinct tools left fingerprints in the metadata. A document \
                     touched by several tools has an inconsistent provenance chain.",
                    detected_tools.len()
                ),
            )
            .with_evidence(detected_tools.iter().map(|name| name.to_string()).collect()),
        );
    }

    if let Some(finding) = check_creator_producer(metadata, heuristic) {
        findings.push(finding);
    }

    findings
}

fn check_creator_producer(
    metadata: &BTreeMap<String, String>,
    heuristic: &dyn ProvenanceHeuristic,
) -> Option<Finding> {
    let creator = nonempty(metadata.get("info:Creator"))
        .or_else(|| nonempty(metadata.get("xmp:CreatorTool")))?;
    let producer = nonempty(metadata.get("info:Producer"))
        .or_else(|| nonempty(metadata.get("xmp:Producer")))?;
    if heuristic.consistent(creator, producer) {
        return None;
    }
    Some(
        Finding::new(
            Severity::Medium,
            FindingCategory::Metadata,
            "Creator/producer mismatch",
            "The creating application and the producing library disagree, which \
             often means the document was regenerated or edited after creation.",
        )
        .with_evidence(vec![
            format!("Creator: {}", creator),
            format!("Producer: {}", producer),
        ]),
    )
}

fn nonempty(value: Option<&String>) -> Option<&String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(pairs: &[(&str, &str)]) -> Vec<Finding> {
        analyze(&meta(pairs), &SubstringHeuristic, &EngineConfig::default())
    }

    #[test]
    fn test_single_tool_single_finding() {
        let findings = run(&[("info:Producer", "iText 7.1.2 (AGPL)")]);
        let tools: Vec<_> = findings
            .iter()
            .filter(|f| f.title.starts_with("Editing tool"))
            .collect();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].severity, Severity::Medium);
        assert!(tools[0].evidence[0].contains("info:Producer"));
        assert!(findings.iter().all(|f| f.title != "Multiple creation tools"));
    }

    #[test]
    fn test_multiple_tools_escalate() {
        let findings = run(&[
            ("info:Producer", "iText 7.1.2"),
            ("info:Creator", "pikepdf 5.0"),
        ]);
        let tools: Vec<_> = findings
            .iter()
            .filter(|f| f.title.starts_with("Editing tool"))
            .collect();
        assert_eq!(tools.len(), 2);
        let aggregate = findings
            .iter()
            .find(|f| f.title == "Multiple creation tools")
            .expect("aggregate finding");
        assert_eq!(aggregate.severity, Severity::High);
        assert!(aggregate.evidence.contains(&"itext".to_string()));
        assert!(aggregate.evidence.contains(&"pikepdf".to_string()));
        // aggregate leads the sequence
        assert_eq!(findings[0].title, "Multiple creation tools");
    }

    #[test]
    fn test_same_tool_in_two_fields_is_not_multi_tool() {
        let findings = run(&[
            ("info:Producer", "Acrobat Distiller"),
            ("info:Creator", "Adobe Acrobat Pro"),
        ]);
        assert!(findings.iter().all(|f| f.title != "Multiple creation tools"));
    }

    #[test]
    fn test_creator_producer_mismatch() {
        let findings = run(&[
            ("info:Creator", "Microsoft Word"),
            ("info:Producer", "Ghostscript 9.55"),
        ]);
        let mismatch = findings
            .iter()
            .find(|f| f.title == "Creator/producer mismatch")
            .expect("mismatch finding");
        assert_eq!(mismatch.severity, Severity::Medium);
        assert_eq!(mismatch.evidence.len(), 2);
    }

    #[test]
    fn test_substring_containment_is_consistent() {
        let findings = run(&[
            ("info:Creator", "Writer"),
            ("info:Producer", "LibreOffice 7.4 Writer"),
        ]);
        assert!(findings.iter().all(|f| f.title != "Creator/producer mismatch"));
    }

    #[test]
    fn test_missing_fields_no_mismatch_check() {
        let findings = run(&[("info:Creator", "Scribus 1.5")]);
        assert!(findings.iter().all(|f| f.title != "Creator/producer mismatch"));
    }

    #[test]
    fn test_xmp_fallback_fields() {
        let findings = run(&[
            ("xmp:CreatorTool", "Microsoft Word"),
            ("xmp:Producer", "Ghostscript 9.55"),
        ]);
        assert!(findings.iter().any(|f| f.title == "Creator/producer mismatch"));
    }

    #[test]
    fn test_empty_metadata_no_findings() {
        assert!(run(&[]).is_empty());
    }
}
