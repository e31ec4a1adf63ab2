//! veridoc — PDF forensic analysis engine
//!
//! Given the raw bytes of a PDF, produces an immutable [`ForensicReport`]
//! of indicators that the document may have been tampered with, hides
//! content, or carries inconsistent provenance. The engine surfaces
//! indicators, never verdicts, and always returns a best-effort report once
//! the buffer is in hand — malformed input degrades individual analyzers
//! into findings instead of failing the request.
//!
//! ```no_run
//! use veridoc::{EngineConfig, ForensicEngine};
//!
//! # async fn run() -> veridoc::Result<()> {
//! let engine = ForensicEngine::new(EngineConfig::default());
//! let report = engine.analyze(std::fs::read("filing.pdf")?, "filing.pdf").await?;
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod assembler;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod hash;
pub mod report;
pub mod scanner;
pub mod store;
pub mod utils;

pub use analyzer::toolchain::{ProvenanceHeuristic, SubstringHeuristic};
pub use config::EngineConfig;
pub use engine::ForensicEngine;
pub use error::{Error, Result};
pub use report::{Finding, FindingCategory, ForensicReport, PageAnalysis, Severity};
pub use scanner::{ContentSource, RawContent};
pub use store::{MemoryReportStore, ReportStore};
