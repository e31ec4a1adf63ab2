//! Forensic engine orchestration
//!
//! One analysis request is one synchronous unit of work over an immutable
//! buffer snapshot. The async boundary dispatches it to a blocking worker so
//! CPU-bound scans never stall the runtime; the independent raw-buffer
//! scanners fan out across the rayon pool. Once the buffer is in hand the
//! engine always returns a report — no analyzer failure escapes as an error.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::analyzer::toolchain::{self, ProvenanceHeuristic, SubstringHeuristic};
use crate::analyzer::pages;
use crate::assembler::{self, ReportInput};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::extractor;
use crate::hash;
use crate::report::ForensicReport;
use crate::scanner::{census, content, signature, structure, RawContent};

/// Document forensic analysis engine
#[derive(Clone)]
pub struct ForensicEngine {
    config: EngineConfig,
    provenance: Arc<dyn ProvenanceHeuristic>,
}

impl Default for ForensicEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ForensicEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            provenance: Arc::new(SubstringHeuristic),
        }
    }

    /// Replaces the creator/producer consistency heuristic.
    pub fn with_provenance_heuristic(
        mut self,
        heuristic: Arc<dyn ProvenanceHeuristic>,
    ) -> Self {
        self.provenance = heuristic;
        self
    }

    /// Analyzes a buffer on the blocking pool. Returns an error only for
    /// oversized input or a failed worker dispatch; any parseability problem
    /// inside the buffer yields a degraded report instead.
    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    pub async fn analyze(&self, bytes: Vec<u8>, filename: &str) -> Result<ForensicReport> {
        self.check_size(bytes.len())?;
        let config = self.config.clone();
        let provenance = Arc::clone(&self.provenance);
        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || {
            analyze_buffer(&bytes, &filename, &config, provenance.as_ref())
        })
        .await
        .map_err(|err| Error::Task(err.to_string()))
    }

    /// Reads a file and analyzes it. I/O failure here is the engine's only
    /// fatal path: the buffer never made it into memory.
    #[instrument(skip(self))]
    pub async fn analyze_path(&self, path: &Path) -> Result<ForensicReport> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.analyze(bytes, &filename).await
    }

    /// Synchronous entry point for callers without a runtime.
    pub fn analyze_sync(&self, bytes: &[u8], filename: &str) -> Result<ForensicReport> {
        self.check_size(bytes.len())?;
        Ok(analyze_buffer(
            bytes,
            filename,
            &self.config,
            self.provenance.as_ref(),
        ))
    }

    fn check_size(&self, actual: usize) -> Result<()> {
        if actual > self.config.max_input_size {
            return Err(Error::InputTooLarge {
                actual,
                limit: self.config.max_input_size,
            });
        }
        Ok(())
    }
}

/// The synchronous pipeline: hashes and extraction first, then the
/// independent analyzers over the same immutable buffer, assembly last.
fn analyze_buffer(
    bytes: &[u8],
    filename: &str,
    config: &EngineConfig,
    provenance: &dyn ProvenanceHeuristic,
) -> ForensicReport {
    let (md5, sha256) = hash::digests(bytes);
    let extraction = extractor::extract(bytes);

    let raw = RawContent::new(bytes);
    let ((structural, content_findings), (signature_findings, census_findings)) = rayon::join(
        || {
            rayon::join(
                || structure::scan(bytes, config),
                || content::scan(&raw, config),
            )
        },
        || rayon::join(|| signature::scan(bytes), || census::scan(bytes)),
    );
    let (page_analysis, page_findings) = pages::analyze(bytes, extraction.page_count, config);
    let tool_findings = toolchain::analyze(&extraction.metadata, provenance, config);

    let mut findings = Vec::new();
    findings.extend(extraction.findings);
    findings.extend(structural.findings);
    findings.extend(content_findings);
    findings.extend(page_findings);
    findings.extend(signature_findings);
    findings.extend(tool_findings);
    findings.extend(census_findings);

    let report = assembler::assemble(
        ReportInput {
            filename,
            size_bytes: bytes.len(),
            md5,
            sha256,
            metadata: extraction.metadata,
            page_analysis,
            eof_marker_count: structural.eof_marker_count,
            findings,
        },
        config,
    );
    info!(
        report_id = %report.id,
        findings = report.findings.len(),
        revisions = report.revision_count,
        "analysis complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_input_rejected() {
        let engine = ForensicEngine::new(EngineConfig {
            max_input_size: 16,
            ..EngineConfig::default()
        });
        let result = engine.analyze_sync(&[0u8; 32], "big.pdf");
        assert!(matches!(
            result,
            Err(Error::InputTooLarge { actual: 32, limit: 16 })
        ));
    }

    #[test]
    fn test_zero_byte_buffer_yields_report() {
        let engine = ForensicEngine::default();
        let report = engine.analyze_sync(b"", "empty.pdf").unwrap();
        assert_eq!(report.page_count, 0);
        assert!(report.metadata.is_empty());
        assert_eq!(report.revision_count, 1);
        assert!(report
            .findings
            .iter()
            .any(|f| f.title == "Document extraction degraded"));
    }

    #[tokio::test]
    async fn test_async_analyze_matches_sync() {
        let engine = ForensicEngine::default();
        let data = b"%PDF-1.4\nhello\n%%EOF".to_vec();
        let report = engine.analyze(data.clone(), "a.pdf").await.unwrap();
        let sync_report = engine.analyze_sync(&data, "a.pdf").unwrap();
        assert_eq!(report.md5, sync_report.md5);
        assert_eq!(report.sha256, sync_report.sha256);
        assert_eq!(report.revision_count, sync_report.revision_count);
    }

    #[tokio::test]
    async fn test_analyze_path_missing_file_is_fatal() {
        let engine = ForensicEngine::default();
        let result = engine
            .analyze_path(Path::new("/nonexistent/evidence.pdf"))
            .await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
