//! # Timings Tool - Main Entry Point
//!
//! Command-line inspection of persisted pairwise timings documents:
//!
//! - `show`: print the mean-cost matrix as a table
//! - `validate`: decode a document and report its shape
//!
//! Errors are reported through `anyhow` and end the process with a non-zero
//! exit status.

use anyhow::Result;
use clap::Parser;
use pairwise_timings::{
    cli::{Args, Command, TimingUnit},
    logging, results,
    utils::{format_nanos, format_value, matrix_table_lines},
};
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    debug!(
        "Starting timings tool v{}: {:?}",
        pairwise_timings::VERSION,
        args
    );

    match args.command {
        Command::Show {
            file,
            unit,
            precision,
        } => {
            let timings = results::read_document(&file)?;
            info!(
                "Source {} of {} participants, {} buckets ({} values)",
                timings.source(),
                timings.participant_count(),
                timings.max_bucket(),
                unit
            );

            let lines = match unit {
                TimingUnit::Raw => matrix_table_lines(&timings, |v| format_value(v, precision)),
                TimingUnit::Nanoseconds => matrix_table_lines(&timings, format_nanos),
            };
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Validate { file } => {
            let timings = results::read_document(&file)?;
            info!(
                "{:?} is valid: participants={}, source={}, max_bucket={}",
                file,
                timings.participant_count(),
                timings.source(),
                timings.max_bucket()
            );
        }
    }

    Ok(())
}
