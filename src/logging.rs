//! # Console Logging
//!
//! Installs the `tracing` subscriber used by `timings-tool`, with a
//! level-colored event formatter.

use colored::*;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Event formatter for the inspection tool's console output.
///
/// Each line is colored by level. Warnings and errors get a short level
/// prefix; informational lines are printed bare.
pub struct ToolFormatter;

impl<S, N> FormatEvent<S, N> for ToolFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut buffer = String::new();
        ctx.format_fields(Writer::new(&mut buffer), event)?;

        let line = match *event.metadata().level() {
            Level::ERROR => format!("error: {}", buffer).red().bold(),
            Level::WARN => format!("warning: {}", buffer).yellow(),
            Level::INFO => buffer.normal(),
            Level::DEBUG => buffer.blue(),
            Level::TRACE => buffer.purple(),
        };

        writeln!(writer, "{}", line)
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` when `verbose`
/// and `info` when not.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(ToolFormatter)
        .with_writer(std::io::stderr)
        .init();
}
