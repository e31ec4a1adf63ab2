//! Error types for the forensic analysis engine.
//!
//! Recoverable analyzer failures (partial parses, unreadable object graphs)
//! never surface here; they become report findings. An `Error` means the
//! engine was never able to start or finish a report at all.

use std::io;

use thiserror::Error;

/// Custom result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Request-level failures, distinct from a completed (possibly degraded) report
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("input of {actual} bytes exceeds the {limit} byte limit")]
    InputTooLarge { actual: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("analysis task failed: {0}")]
    Task(String),

    #[error("report store error: {0}")]
    Store(String),
}
