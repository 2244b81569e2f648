//! # Formatting Helpers
//!
//! Human-readable rendering of mean timings and simple console tables, used
//! by the inspection tool.
//!
//! ```rust
//! use pairwise_timings::utils::*;
//!
//! assert_eq!(format_nanos(1500.0), "1.50μs");
//! assert_eq!(format_table_separator(&[3, 5]), "+-----+-------+");
//! ```

use crate::aggregate::AggregatedTimings;

/// Format a value measured in nanoseconds with an appropriate unit
///
/// - **Nanoseconds**: < 1,000 ns (e.g., "500.00ns")
/// - **Microseconds**: < 1,000,000 ns (e.g., "1.50μs")
/// - **Milliseconds**: < 1,000,000,000 ns (e.g., "25.75ms")
/// - **Seconds**: everything above
///
/// ```rust
/// # use pairwise_timings::utils::format_nanos;
/// assert_eq!(format_nanos(750.0), "750.00ns");
/// assert_eq!(format_nanos(2_500_000.0), "2.50ms");
/// ```
pub fn format_nanos(ns: f64) -> String {
    let magnitude = ns.abs();

    if magnitude < 1_000.0 {
        format!("{:.2}ns", ns)
    } else if magnitude < 1_000_000.0 {
        format!("{:.2}μs", ns / 1_000.0)
    } else if magnitude < 1_000_000_000.0 {
        format!("{:.2}ms", ns / 1_000_000.0)
    } else {
        format!("{:.2}s", ns / 1_000_000_000.0)
    }
}

/// Format a value in whatever unit the harness recorded it in
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{:.precision$}", value, precision = precision)
}

/// Render one table row, padding each column to its width
///
/// Columns without a width entry fall back to 10 characters.
pub fn format_table_row(columns: &[&str], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, column) in columns.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(10);
        line.push_str(&format!(" {:width$} |", column, width = width));
    }
    line
}

/// Render a horizontal separator matching `widths`
///
/// ```text
/// +--------+-----------+-----------+
/// | target | bucket 1  | bucket 2  |
/// +--------+-----------+-----------+
/// ```
pub fn format_table_separator(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for &width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

/// Lay out `timings` as a table: one line per target, one column per
/// bucket. The source row is marked and its cells left blank.
pub fn matrix_table_lines<F>(timings: &AggregatedTimings, format_cell: F) -> Vec<String>
where
    F: Fn(f64) -> String,
{
    let buffer = timings.buffer();
    let mut header = vec!["target".to_string()];
    header.extend((1..=timings.max_bucket()).map(|count| format!("bucket {}", count)));

    let body: Vec<Vec<String>> = (0..timings.participant_count())
        .map(|target| {
            let mut row = Vec::with_capacity(timings.max_bucket() + 1);
            if target == timings.source() {
                row.push(format!("{} (source)", target));
                row.extend((0..timings.max_bucket()).map(|_| "-".to_string()));
            } else {
                row.push(target.to_string());
                row.extend(buffer.row(target).iter().map(|&v| format_cell(v)));
            }
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            body.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    fn as_strs(row: &[String]) -> Vec<&str> {
        row.iter().map(String::as_str).collect()
    }

    let separator = format_table_separator(&widths);

    let mut lines = vec![
        separator.clone(),
        format_table_row(&as_strs(&header), &widths),
        separator.clone(),
    ];
    lines.extend(body.iter().map(|row| format_table_row(&as_strs(row), &widths)));
    lines.push(separator);
    lines
}
