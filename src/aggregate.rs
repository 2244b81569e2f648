//! # Mean-Cost Aggregation
//!
//! Reduces a completed [`TimingsCollector`] to a dense
//! `participant_count × max_bucket` matrix of mean timings. Row `t` holds
//! the costs of talking to participant `t`; column `c` holds bucket `c + 1`.
//!
//! The source participant's row is never written by aggregation; it starts
//! zero-filled and keeps whatever it held before the pass.
//! Readers must treat it as "no data", not as a measured cost of zero.

use crate::collector::{check_dimension, TimingsCollector};
use crate::error::{Result, TimingsError};
use nalgebra::{DMatrix, DVector, RowDVector};
use tracing::{debug, info};

/// Per-target mean timings for one source participant
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTimings {
    aggregated: DMatrix<f64>,
    participant_count: usize,
    source: usize,
    max_bucket: usize,
}

impl AggregatedTimings {
    /// Create a zero-filled matrix for the given run shape
    pub fn new(participant_count: usize, source: usize, max_bucket: usize) -> Self {
        Self {
            aggregated: DMatrix::zeros(participant_count, max_bucket),
            participant_count,
            source,
            max_bucket,
        }
    }

    /// Build a matrix shaped like `timings` and aggregate it in one go
    pub fn try_from_collector(timings: &TimingsCollector) -> Result<Self> {
        let mut aggregated = Self::new(
            timings.participant_count(),
            timings.source(),
            timings.max_bucket(),
        );
        aggregated.aggregate(timings)?;
        Ok(aggregated)
    }

    /// Overwrite every non-source row with the means held in `timings`.
    ///
    /// The source row is never written. The pass either completes or leaves
    /// the matrix untouched. A pair with no samples fails with
    /// [`TimingsError::EmptySamples`].
    pub fn aggregate(&mut self, timings: &TimingsCollector) -> Result<()> {
        check_dimension(
            "participant_count",
            self.participant_count,
            timings.participant_count(),
        )?;
        check_dimension("max_bucket", self.max_bucket, timings.max_bucket())?;
        check_dimension("source", self.source, timings.source())?;

        debug!(
            "Aggregating {} samples for source {}",
            timings.sample_count(),
            self.source
        );

        let mut aggregated = self.aggregated.clone();
        for target in (0..self.participant_count).filter(|&t| t != self.source) {
            for count in 1..=self.max_bucket {
                let samples = timings.count_timings(target, count)?;
                if samples.is_empty() {
                    return Err(TimingsError::EmptySamples { target, count });
                }
                aggregated[(target, count - 1)] = DVector::from_column_slice(samples).mean();
            }
        }
        self.aggregated = aggregated;

        info!(
            "Aggregated {} targets x {} buckets for source {}",
            self.participant_count.saturating_sub(1),
            self.max_bucket,
            self.source
        );
        Ok(())
    }

    /// Mean timing for `(target, count)`, with `count` 1-based
    pub fn mean(&self, target: usize, count: usize) -> Result<f64> {
        if count == 0 || count > self.max_bucket {
            return Err(self.out_of_range(target, count));
        }
        let row = self.target_row(target)?;
        Ok(row[count - 1])
    }

    /// Copy of the mean timings for `target`, one entry per bucket
    pub fn target_row(&self, target: usize) -> Result<RowDVector<f64>> {
        if target >= self.participant_count || target == self.source {
            return Err(self.out_of_range(target, 0));
        }
        Ok(self.aggregated.row(target).into_owned())
    }

    /// The full `participant_count × max_bucket` matrix, source row included
    pub fn buffer(&self) -> &DMatrix<f64> {
        &self.aggregated
    }

    /// Mutable access for in-place population, e.g. while decoding
    pub fn buffer_mut(&mut self) -> &mut DMatrix<f64> {
        &mut self.aggregated
    }

    /// Number of rows, one per participant
    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    /// Index of the participant whose row is excluded
    pub fn source(&self) -> usize {
        self.source
    }

    /// Number of columns; column `c` holds bucket `c + 1`
    pub fn max_bucket(&self) -> usize {
        self.max_bucket
    }

    fn out_of_range(&self, target: usize, count: usize) -> TimingsError {
        TimingsError::OutOfRange {
            target,
            count,
            participant_count: self.participant_count,
            source_index: self.source,
            max_bucket: self.max_bucket,
        }
    }
}
