//! Report data model
//!
//! A [`ForensicReport`] is assembled once per analysis, fully populated
//! synchronously, and never mutated afterwards. Findings are kept sorted by
//! triage priority (critical first).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Triage rank of a finding. The declaration order is the sort order:
/// `Critical` ranks before `Info`, and the derived `Ord` follows it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Fixed ordinal used by the report assembler (critical = 0 … info = 4)
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        };
        write!(f, "{}", name)
    }
}

/// Category label attached to each finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingCategory {
    Metadata,
    Structure,
    Content,
    Pages,
    Signature,
    Objects,
    Extraction,
}

impl std::fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FindingCategory::Metadata => "Metadata",
            FindingCategory::Structure => "Structure",
            FindingCategory::Content => "Content",
            FindingCategory::Pages => "Pages",
            FindingCategory::Signature => "Signature",
            FindingCategory::Objects => "Objects",
            FindingCategory::Extraction => "Extraction",
        };
        write!(f, "{}", name)
    }
}

/// One detected indicator of potential tampering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: FindingCategory,
    pub title: String,
    pub detail: String,
    /// Raw excerpts backing the finding. The assembler bounds each entry to
    /// the configured excerpt length.
    pub evidence: Vec<String>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        category: FindingCategory,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            title: title.into(),
            detail: detail.into(),
            evidence: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }
}

/// Page geometry summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub total_pages: usize,
    /// Human-readable descriptions of pages whose dimensions deviate from
    /// the first page
    pub inconsistent_pages: Vec<String>,
}

/// Complete forensic analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForensicReport {
    pub id: Uuid,
    pub filename: String,
    pub size_bytes: usize,
    pub md5: String,
    pub sha256: String,
    pub analyzed_at: DateTime<Utc>,
    pub page_count: usize,
    pub findings: Vec<Finding>,
    /// Standard info-dictionary fields (`info:` prefix) merged with extended
    /// metadata-stream fields (`xmp:` prefix)
    pub metadata: BTreeMap<String, String>,
    pub severity_counts: BTreeMap<Severity, usize>,
    pub revision_count: usize,
    pub page_analysis: PageAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
        assert!(Severity::Low < Severity::Info);
        assert_eq!(Severity::Critical.rank(), 0);
        assert_eq!(Severity::Info.rank(), 4);
    }

    #[test]
    fn test_severity_serializes_as_lowercase_string() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn test_severity_counts_as_json_keys() {
        let mut counts = BTreeMap::new();
        counts.insert(Severity::High, 2usize);
        counts.insert(Severity::Info, 1usize);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, "{\"high\":2,\"info\":1}");
    }

    #[test]
    fn test_finding_builder() {
        let finding = Finding::new(
            Severity::High,
            FindingCategory::Structure,
            "Trailing data",
            "bytes after logical end of file",
        )
        .with_evidence(vec!["15 bytes".to_string()]);
        assert_eq!(finding.evidence.len(), 1);
        assert_eq!(finding.category.to_string(), "Structure");
    }
}
