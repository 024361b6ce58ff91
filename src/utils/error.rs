//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types. The
//! taxonomy is deliberately small: nothing in the accounting engine does
//! I/O except the report writers, so most errors are construction-time
//! misuse.

use thiserror::Error;

/// Errors raised when a component is constructed with invalid settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("top-k capacity must be at least 1")]
    ZeroCapacity,

    #[error("unknown rank metric: {0} (expected \"time\" or \"count\")")]
    UnknownRankMetric(String),

    #[error("no event names given")]
    EmptyEventList,
}

/// Errors that can occur while writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}
