//! Engine configuration
//!
//! Every detection threshold is a named field here rather than a literal in
//! analyzer code, so deployments can tune them without touching the scanners.

use serde::{Deserialize, Serialize};

/// Configuration for a [`ForensicEngine`](crate::engine::ForensicEngine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum input size accepted before analysis starts. Full-buffer scans
    /// are CPU-bound, so this bounds worst-case scan time.
    pub max_input_size: usize,

    /// Maximum length (in characters) of a single evidence excerpt
    pub evidence_excerpt_len: usize,

    /// Bytes after the final `%%EOF` marker tolerated before the trailing
    /// data check fires
    pub trailing_byte_threshold: usize,

    /// Printable characters the trimmed trailing content must exceed to be
    /// considered non-trivial
    pub trailing_printable_threshold: usize,

    /// Page width/height deviation (in PDF units) from the first page before
    /// a page counts as inconsistent
    pub page_dimension_tolerance: f64,

    /// Number of distinct authoring tools above which the aggregate
    /// multi-tool provenance finding is emitted
    pub multi_tool_threshold: usize,

    /// Cap on font sizes listed as evidence by the microscopic-text check
    pub max_reported_font_sizes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_size: 50 * 1024 * 1024, // 50MB
            evidence_excerpt_len: 160,
            trailing_byte_threshold: 10,
            trailing_printable_threshold: 5,
            page_dimension_tolerance: 1.0,
            multi_tool_threshold: 1,
            max_reported_font_sizes: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = EngineConfig::default();
        assert_eq!(config.max_input_size, 50 * 1024 * 1024);
        assert_eq!(config.multi_tool_threshold, 1);
        assert!(config.page_dimension_tolerance > 0.0);
    }

    #[test]
    fn test_config_round_trip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.evidence_excerpt_len, config.evidence_excerpt_len);
    }
}
