// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod report;
mod utils;

pub use crate::cli::{Args, run};
pub use crate::config::{ConfigFile, Settings};
pub use crate::core::ignore::{Patterns, load_ignore_file};
pub use crate::core::scanner::{Scanner, collect_files};
pub use crate::core::tokenizer::{Encoding, Tokenizer};
pub use crate::error::CombinerError;
pub use crate::models::{AcceptedFile, FileTokens, RunStats, SkippedFile, StatsSnapshot};
pub use crate::output::OutputWriter;
