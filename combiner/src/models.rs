// src/models.rs
pub mod accepted_file;
pub mod run_stats;

pub use accepted_file::AcceptedFile;
pub use run_stats::{FileTokens, RunStats, SkippedFile, StatsSnapshot};
