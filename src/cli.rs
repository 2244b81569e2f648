//! # Command-Line Interface
//!
//! Argument parsing for `timings-tool` using the clap derive API. The tool
//! only reads existing documents; run shapes come from the documents.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and validate pairwise timings documents
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// Verbose output
    #[clap(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the mean-cost matrix held in a document as a table
    Show {
        /// Timings document (JSON)
        #[clap(default_value = crate::defaults::OUTPUT_FILE)]
        file: PathBuf,

        /// How to render cell values
        #[clap(short = 'u', long, value_enum, default_value_t = TimingUnit::Raw)]
        unit: TimingUnit,

        /// Decimal places for raw values
        #[clap(short = 'p', long, default_value_t = crate::defaults::DISPLAY_PRECISION)]
        precision: usize,
    },

    /// Decode a document and report its shape
    Validate {
        /// Timings document (JSON)
        #[clap(default_value = crate::defaults::OUTPUT_FILE)]
        file: PathBuf,
    },
}

/// Units the harness recorded timings in
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TimingUnit {
    /// Print values as stored
    #[clap(name = "raw")]
    Raw,

    /// Values are nanoseconds; scale to a readable unit
    #[clap(name = "ns")]
    Nanoseconds,
}

impl std::fmt::Display for TimingUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingUnit::Raw => write!(f, "raw"),
            TimingUnit::Nanoseconds => write!(f, "nanoseconds"),
        }
    }
}
