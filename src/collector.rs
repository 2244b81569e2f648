//! # Raw Sample Store
//!
//! `TimingsCollector` accumulates raw timing observations for one benchmark
//! run. Observations are keyed by the target participant and a 1-based
//! repetition/size bucket, and kept in append order.
//!
//! Storage is a flattened `participant_count × max_bucket` array of growable
//! sequences. Every read and write goes through a single checked accessor,
//! so the source participant's row and bucket `0` can never be populated.

use crate::error::{Result, TimingsError};
use std::time::Duration;
use tracing::debug;

/// Append-only store of raw timings for a single source participant
#[derive(Debug, Clone, PartialEq)]
pub struct TimingsCollector {
    timings: Vec<Vec<f64>>,
    participant_count: usize,
    source: usize,
    max_bucket: usize,
}

impl TimingsCollector {
    /// Create an empty collector for `participant_count` participants, run
    /// from `source`, tracking buckets `1..=max_bucket`.
    pub fn new(participant_count: usize, source: usize, max_bucket: usize) -> Result<Self> {
        if source >= participant_count {
            return Err(TimingsError::OutOfRange {
                target: source,
                count: 0,
                participant_count,
                source_index: source,
                max_bucket,
            });
        }

        debug!(
            "Creating timings collector: p={}, s={}, max_bucket={}",
            participant_count, source, max_bucket
        );

        Ok(Self {
            timings: vec![Vec::new(); participant_count * max_bucket],
            participant_count,
            source,
            max_bucket,
        })
    }

    /// Append a timing observation for `(target, count)`
    pub fn add_timing(&mut self, target: usize, count: usize, timing: f64) -> Result<()> {
        let slot = self.slot(target, count)?;
        self.timings[slot].push(timing);
        Ok(())
    }

    /// Append a measured duration, stored as nanoseconds
    pub fn record(&mut self, target: usize, count: usize, elapsed: Duration) -> Result<()> {
        self.add_timing(target, count, elapsed.as_nanos() as f64)
    }

    /// All observations for `(target, count)` in append order.
    ///
    /// An empty slice means nothing was recorded for the pair.
    pub fn count_timings(&self, target: usize, count: usize) -> Result<&[f64]> {
        let slot = self.slot(target, count)?;
        Ok(&self.timings[slot])
    }

    /// Append every observation held by `other` after this collector's own.
    ///
    /// Both collectors must describe the same run shape. Used to combine
    /// stores filled by independent measurement tasks.
    pub fn merge(&mut self, other: &TimingsCollector) -> Result<()> {
        check_dimension("participant_count", self.participant_count, other.participant_count)?;
        check_dimension("source", self.source, other.source)?;
        check_dimension("max_bucket", self.max_bucket, other.max_bucket)?;

        for (mine, theirs) in self.timings.iter_mut().zip(&other.timings) {
            mine.extend_from_slice(theirs);
        }

        debug!(
            "Merged {} samples into collector (now {})",
            other.sample_count(),
            self.sample_count()
        );
        Ok(())
    }

    /// Total number of stored observations across all pairs
    pub fn sample_count(&self) -> usize {
        self.timings.iter().map(Vec::len).sum()
    }

    /// Number of participants in the run, the source included
    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    /// Participant running this collector; never a valid target
    pub fn source(&self) -> usize {
        self.source
    }

    /// Largest bucket index tracked; buckets run `1..=max_bucket`
    pub fn max_bucket(&self) -> usize {
        self.max_bucket
    }

    /// Map `(target, count)` to its flat storage index, rejecting the self
    /// row and anything outside `[0, p) × [1, max_bucket]`.
    fn slot(&self, target: usize, count: usize) -> Result<usize> {
        if target >= self.participant_count
            || target == self.source
            || count == 0
            || count > self.max_bucket
        {
            return Err(TimingsError::OutOfRange {
                target,
                count,
                participant_count: self.participant_count,
                source_index: self.source,
                max_bucket: self.max_bucket,
            });
        }

        Ok(target * self.max_bucket + (count - 1))
    }
}

pub(crate) fn check_dimension(field: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(TimingsError::DimensionMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}
