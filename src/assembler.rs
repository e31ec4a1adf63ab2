//! Report assembler
//!
//! Merges every analyzer's findings into one immutable report: severity
//! sort (stable within a tier), per-severity tallies, revision count, and
//! chain-of-custody fields.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::report::{Finding, ForensicReport, PageAnalysis};
use crate::utils::excerpt;

/// Everything the assembler needs from the upstream analyzers
pub struct ReportInput<'a> {
    pub filename: &'a str,
    pub size_bytes: usize,
    pub md5: String,
    pub sha256: String,
    pub metadata: BTreeMap<String, String>,
    pub page_analysis: PageAnalysis,
    pub eof_marker_count: usize,
    pub findings: Vec<Finding>,
}

#[instrument(skip(input, config), fields(findings = input.findings.len()))]
pub fn assemble(input: ReportInput<'_>, config: &EngineConfig) -> ForensicReport {
    let mut findings = input.findings;
    for finding in &mut findings {
        for evidence in &mut finding.evidence {
            if evidence.chars().count() > config.evidence_excerpt_len {
                *evidence = excerpt(evidence, config.evidence_excerpt_len);
            }
        }
    }

    // Vec::sort_by_key is stable, preserving emission order within a tier
    findings.sort_by_key(|finding| finding.severity.rank());

    let mut severity_counts = BTreeMap::new();
    for finding in &findings {
        *severity_counts.entry(finding.severity).or_insert(0) += 1;
    }

    ForensicReport {
        id: Uuid::new_v4(),
        filename: input.filename.to_string(),
        size_bytes: input.size_bytes,
        md5: input.md5,
        sha256: input.sha256,
        analyzed_at: Utc::now(),
        page_count: input.page_analysis.total_pages,
        findings,
        metadata: input.metadata,
        severity_counts,
        revision_count: input.eof_marker_count.max(1),
        page_analysis: input.page_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FindingCategory, Severity};

    fn input(findings: Vec<Finding>, eof_marker_count: usize) -> ReportInput<'static> {
        ReportInput {
            filename: "sample.pdf",
            size_bytes: 1024,
            md5: "a".repeat(32),
            sha256: "b".repeat(64),
            metadata: BTreeMap::new(),
            page_analysis: PageAnalysis::default(),
            eof_marker_count,
            findings,
        }
    }

    fn finding(severity: Severity, title: &str) -> Finding {
        Finding::new(severity, FindingCategory::Structure, title, "detail")
    }

    #[test]
    fn test_findings_sorted_by_severity() {
        let report = assemble(
            input(
                vec![
                    finding(Severity::Info, "c"),
                    finding(Severity::Critical, "a"),
                    finding(Severity::Medium, "b"),
                ],
                1,
            ),
            &EngineConfig::default(),
        );
        let ranks: Vec<u8> = report.findings.iter().map(|f| f.severity.rank()).collect();
        assert_eq!(ranks, vec![0, 2, 4]);
    }

    #[test]
    fn test_sort_is_stable_within_tier() {
        let report = assemble(
            input(
                vec![
                    finding(Severity::High, "first"),
                    finding(Severity::High, "second"),
                    finding(Severity::Critical, "lead"),
                ],
                1,
            ),
            &EngineConfig::default(),
        );
        assert_eq!(report.findings[1].title, "first");
        assert_eq!(report.findings[2].title, "second");
    }

    #[test]
    fn test_severity_counts_sum_to_total() {
        let report = assemble(
            input(
                vec![
                    finding(Severity::High, "a"),
                    finding(Severity::High, "b"),
                    finding(Severity::Info, "c"),
                ],
                1,
            ),
            &EngineConfig::default(),
        );
        let total: usize = report.severity_counts.values().sum();
        assert_eq!(total, report.findings.len());
        assert_eq!(report.severity_counts[&Severity::High], 2);
    }

    #[test]
    fn test_revision_count_floors_at_one() {
        let report = assemble(input(vec![], 0), &EngineConfig::default());
        assert_eq!(report.revision_count, 1);
        let report = assemble(input(vec![], 3), &EngineConfig::default());
        assert_eq!(report.revision_count, 3);
    }

    #[test]
    fn test_evidence_bounded() {
        let long = "x".repeat(500);
        let report = assemble(
            input(
                vec![finding(Severity::Low, "t").with_evidence(vec![long])],
                1,
            ),
            &EngineConfig::default(),
        );
        let config = EngineConfig::default();
        assert!(
            report.findings[0].evidence[0].chars().count() <= config.evidence_excerpt_len
        );
    }
}
