//! # Pairwise Timings Library
//!
//! Collects raw latency samples from pairwise communication benchmarks among
//! a fixed set of participants, reduces them to per-pair mean-cost matrices,
//! and defines a portable JSON representation for those matrices.
//!
//! ## Architecture Overview
//!
//! Data flows one way through three components:
//!
//! - `collector`: raw sample store keyed by (target participant, bucket)
//! - `aggregate`: dense `participants × buckets` matrix of mean timings
//! - `codec`: encode/decode of the aggregated matrix as a JSON document
//!
//! The source participant never benchmarks itself, so its row is excluded
//! everywhere: it is never populated in the store, never written by the
//! aggregator and never emitted by the codec.
//!
//! ## Usage Example
//!
//! ```rust
//! use pairwise_timings::{codec, AggregatedTimings, TimingsCollector};
//!
//! # fn main() -> Result<(), pairwise_timings::TimingsError> {
//! let mut collector = TimingsCollector::new(3, 1, 2)?;
//! collector.add_timing(0, 1, 10.0)?;
//! collector.add_timing(0, 1, 20.0)?;
//! collector.add_timing(0, 2, 5.0)?;
//! collector.add_timing(2, 1, 100.0)?;
//! collector.add_timing(2, 2, 200.0)?;
//!
//! let timings = AggregatedTimings::try_from_collector(&collector)?;
//! assert_eq!(timings.mean(0, 1)?, 15.0);
//!
//! let json = codec::to_json_string(&timings)?;
//! let decoded = codec::from_json_str(&json)?;
//! assert_eq!(decoded, timings);
//! # Ok(())
//! # }
//! ```
//!
//! No internal synchronization is provided. Stores filled by separate
//! measurement tasks can be combined afterwards with
//! [`TimingsCollector::merge`].

/// Dense mean-cost matrix built from a completed sample store
pub mod aggregate;

pub mod cli;

/// JSON document format for aggregated matrices, plus list encodings of the
/// vector and matrix primitives
pub mod codec;

/// Append-only raw sample storage with checked two-axis addressing
pub mod collector;

pub mod error;

/// Console log formatting for the inspection tool
pub mod logging;

/// Reading and writing timings documents on disk
pub mod results;

pub mod utils;

pub use aggregate::AggregatedTimings;
pub use codec::{TargetTimings, TimingsDocument};
pub use collector::TimingsCollector;
pub use error::TimingsError;

/// The current version of the crate, from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Default document path for the inspection tool
    pub const OUTPUT_FILE: &str = "timings.json";

    /// Decimal places used when printing raw timing values
    pub const DISPLAY_PRECISION: usize = 3;
}
