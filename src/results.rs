//! # Timings Document Persistence
//!
//! Thin file helpers around the codec. The core types never open files;
//! these are the persistence layer the tool and callers' pipelines use.

use crate::aggregate::AggregatedTimings;
use crate::codec;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Write `timings` as a pretty-printed JSON document, replacing `path`
pub fn write_document(path: &Path, timings: &AggregatedTimings) -> Result<()> {
    let json = codec::to_json_string_pretty(timings)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write timings document to {:?}", path))?;

    info!(
        "Timings for source {} written to: {:?}",
        timings.source(),
        path
    );
    Ok(())
}

/// Read and decode a JSON timings document from `path`
pub fn read_document(path: &Path) -> Result<AggregatedTimings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timings document from {:?}", path))?;
    let timings = codec::from_json_str(&json)
        .with_context(|| format!("Invalid timings document {:?}", path))?;

    debug!(
        "Loaded timings from {:?}: p={}, s={}, max_bucket={}",
        path,
        timings.participant_count(),
        timings.source(),
        timings.max_bucket()
    );
    Ok(timings)
}
