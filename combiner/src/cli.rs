// src/cli.rs
use anyhow::{Context as _, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;

use crate::config::Settings;
use crate::core::ignore::Patterns;
use crate::core::scanner::Scanner;
use crate::core::tokenizer::Tokenizer;
use crate::models::{RunStats, StatsSnapshot};
use crate::output::OutputWriter;
use crate::report::print_statistics;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to traverse (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Output file path [default: combined_output.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tokenizer encoding: o200k_base, cl100k_base, p50k_base, p50k_edit or
    /// r50k_base; anything else falls back to cl100k_base [default: p50k_base]
    #[arg(short, long)]
    pub tokenizer: Option<String>,

    /// Files/directories to ignore (repeatable or comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Only collect files matching these patterns (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Include hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Print diagnostics for every skipped or collected file
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file to use instead of the nearest .combiner.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Runs one combine: resolve settings, scan, count tokens, write the
/// combined file and print the summary table to stdout.
///
/// # Errors
///
/// Fails on anything fatal: a bad config or ignore file, an invalid
/// pattern, a missing input directory, an output file that cannot be
/// written, or a tokenizer that cannot be loaded.
#[inline]
pub fn run(args: &Args) -> Result<StatsSnapshot> {
    let settings = Settings::resolve(args).context("Failed to resolve configuration")?;
    let stats = RunStats::new(&settings.output);

    let ignore = Patterns::compile(&settings.ignore_patterns)?;
    let include = Patterns::compile(&settings.include_patterns)?;
    let tokenizer = Tokenizer::new(settings.encoding)?;
    let output = OutputWriter::create(&settings.output)?;

    info!(
        directory = %settings.directory.display(),
        output = %settings.output.display(),
        encoding = %settings.encoding,
        "combining files"
    );

    let files = Scanner::new(&ignore)
        .with_include(&include)
        .skip_hidden(!settings.include_hidden)
        .collect(&settings.directory, &stats)
        .with_context(|| {
            format!("Failed to scan directory: {}", settings.directory.display())
        })?;

    tokenizer.process_files(&files, &stats)?;
    output.write_files(&files)?;

    let snapshot = stats.snapshot();
    print_statistics(&mut io::stdout().lock(), &snapshot)
        .context("Failed to print statistics")?;
    Ok(snapshot)
}
