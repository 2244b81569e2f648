//! # Error Types
//!
//! `TimingsError` covers every failure of the store, aggregator and codec.
//! File-level helpers wrap it in `anyhow` with context.

use thiserror::Error;

/// Errors raised by the sample store, the aggregator and the codec.
///
/// All of them are local, synchronous failures: nothing here is retried and
/// no partially populated structure is handed back alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimingsError {
    /// A `(target, count)` address outside the populated region of a store
    /// or matrix. `count` is 1-based; `target == source` is always rejected.
    #[error(
        "Index out of range: target {target}, count {count} \
         (participants {participant_count}, source {source_index}, max bucket {max_bucket})"
    )]
    OutOfRange {
        target: usize,
        count: usize,
        participant_count: usize,
        source_index: usize,
        max_bucket: usize,
    },

    /// Two structures that must share a shape disagree on it.
    #[error("Dimension mismatch on {field}: expected {expected}, found {found}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// Aggregation hit a pair that never received a sample.
    #[error("No samples recorded for target {target}, count {count}")]
    EmptySamples { target: usize, count: usize },

    #[error("Malformed timings document: {0}")]
    MalformedDocument(String),
}

impl From<serde_json::Error> for TimingsError {
    fn from(err: serde_json::Error) -> Self {
        TimingsError::MalformedDocument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimingsError>;
