// src/main.rs
use clap::Parser;
use combiner::{Args, run};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `--verbose` turns on this crate's
/// debug output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,combiner=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
