//! Output formatting and display for doccat.
//!
//! This module handles all user-facing output of the CLI:
//! - Formatted status messages
//! - Skipped entries, and the resolved file list in verbose mode
//! - Summary reports
//!
//! # Examples
//!
//! ```no_run
//! use doccat::config::MergeConfig;
//! use doccat::output::OutputFormatter;
//!
//! # fn example(config: MergeConfig) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::merge::MergeReport;
use std::io::{self, Write};

/// Display a completed merge on stdout, with skipped entries on stderr.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    let stdout = io::stdout();
    let stderr = io::stderr();
    // Nothing useful to do when the terminal is gone.
    let _ = write_merge_report(formatter, report, &mut stdout.lock(), &mut stderr.lock());
}

/// Write a completed merge report.
///
/// Skipped entries go to `err` as warnings unless quiet. The merge order and
/// statistics are only written in verbose mode; quiet mode writes nothing.
pub fn write_merge_report<O: Write, E: Write>(
    formatter: &OutputFormatter,
    report: &MergeReport,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    if formatter.is_quiet() {
        return Ok(());
    }

    for skipped in &report.skipped {
        writeln!(err, "{}", formatter.render(MessageLevel::Warning, &skipped.to_string()))?;
    }

    if formatter.is_verbose() {
        writeln!(out, "\nMerge order ({} files)", report.files.len())?;
        for (idx, path) in report.files.iter().enumerate() {
            writeln!(out, "  {}. {}", idx + 1, path.display())?;
        }
        writeln!(out)?;
    }

    let summary = format!(
        "Successfully merged {} {} files into {}",
        report.files.len(),
        report.kind.label(),
        report.output.display()
    );
    writeln!(out, "{}", formatter.render(MessageLevel::Success, &summary))?;

    if formatter.is_verbose() {
        let stats = &report.statistics;
        writeln!(out, "\nStatistics")?;
        writeln!(out, "  Input files: {}", stats.files_merged)?;
        writeln!(out, "  Input size: {}", stats.format_input_size())?;
        writeln!(out, "  Output size: {}", stats.format_output_size())?;
        writeln!(out, "  Merge time: {:.2}s", stats.merge_time.as_secs_f64())?;
    }

    out.flush()
}
