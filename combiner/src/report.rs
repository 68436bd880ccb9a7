// src/report.rs
use crate::models::{FileTokens, StatsSnapshot};
use prettytable::{Table, row};
use std::cmp::Reverse;
use std::io::{self, Write};
use std::time::Duration;

pub const TOP_FILES_TO_SHOW: usize = 10;

#[inline]
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{} ms", elapsed.as_millis())
}

#[inline]
#[must_use]
pub fn build_table(stats: &StatsSnapshot) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Statistic", "Value"]);
    table.add_row(row!["Output File", stats.output_file.display()]);
    table.add_row(row!["Files Processed", stats.files_processed]);
    table.add_row(row!["Files Skipped", stats.files_skipped]);
    table.add_row(row!["Directories Visited", stats.directories_visited]);
    table.add_row(row!["Total Tokens", stats.total_tokens]);
    table.add_row(row!["Max Tokens", stats.max_tokens]);
    table.add_row(row![
        "File with Max Tokens",
        stats.max_tokens_file.as_deref().unwrap_or("-")
    ]);
    table.add_row(row!["Processing Time", format_elapsed(stats.elapsed)]);
    table
}

/// The `limit` files with the most tokens, highest first. Files with equal
/// counts keep the order they were recorded in.
#[inline]
#[must_use]
pub fn top_files(stats: &StatsSnapshot, limit: usize) -> Vec<&FileTokens> {
    let mut files: Vec<&FileTokens> = stats.file_tokens.iter().collect();
    files.sort_by_key(|file| Reverse(file.tokens));
    files.truncate(limit);
    files
}

#[inline]
#[must_use]
pub fn build_top_files_table(files: &[&FileTokens]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["File", "Tokens", "Size (bytes)"]);
    for file in files {
        table.add_row(row![file.path, file.tokens, file.bytes]);
    }
    table
}

#[inline]
#[must_use]
pub fn build_skipped_table(stats: &StatsSnapshot) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["File", "Reason"]);
    for skipped in &stats.skipped_files {
        table.add_row(row![skipped.path, skipped.reason]);
    }
    table
}

/// Renders the run summary to `out`, followed by the top files by token
/// count and the skipped files. Either of the last two is left out when it
/// would be empty.
///
/// # Errors
///
/// Propagates write errors from `out`.
#[inline]
pub fn print_statistics<W: Write>(out: &mut W, stats: &StatsSnapshot) -> io::Result<()> {
    build_table(stats).print(out)?;

    let top = top_files(stats, TOP_FILES_TO_SHOW);
    if !top.is_empty() {
        writeln!(out, "\nTop {} Files by Token Count:", top.len())?;
        build_top_files_table(&top).print(out)?;
    }

    if !stats.skipped_files.is_empty() {
        writeln!(out, "\nSkipped Files:")?;
        build_skipped_table(stats).print(out)?;
    }
    Ok(())
}
