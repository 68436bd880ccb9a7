// src/models/run_stats.rs
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Token count and size of one collected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTokens {
    pub path: String,
    pub tokens: u64,
    pub bytes: u64,
}

/// A file that was found but left out of the output, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Default)]
struct Tallies {
    total: u64,
    max: u64,
    max_path: Option<String>,
    files: Vec<FileTokens>,
    skipped: Vec<SkippedFile>,
}

impl Tallies {
    fn add_tokens(&mut self, count: u64, path: &str) {
        self.total = self.total.saturating_add(count);
        if count > self.max {
            self.max = count;
            self.max_path = Some(path.to_owned());
        }
    }
}

/// Counters for a single combiner run.
///
/// Shared by reference between the scanner and the tokenizer; every
/// `record_*` method takes `&self` and is safe to call from several threads
/// at once. Token totals, the max-token record and the per-file lists live
/// behind one mutex so the max count and its path never disagree.
#[derive(Debug)]
pub struct RunStats {
    output_file: PathBuf,
    started: Instant,
    directories_visited: AtomicU64,
    files_processed: AtomicU64,
    files_skipped: AtomicU64,
    tallies: Mutex<Tallies>,
}

/// Point-in-time copy of [`RunStats`], detached from any lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub output_file: PathBuf,
    pub directories_visited: u64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub total_tokens: u64,
    pub max_tokens: u64,
    pub max_tokens_file: Option<String>,
    /// Per-file counts in the order they were recorded.
    pub file_tokens: Vec<FileTokens>,
    pub skipped_files: Vec<SkippedFile>,
    pub elapsed: Duration,
}

impl RunStats {
    /// Starts the clock. The scan root counts as the first visited
    /// directory.
    #[inline]
    #[must_use]
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
            started: Instant::now(),
            directories_visited: AtomicU64::new(1),
            files_processed: AtomicU64::new(0),
            files_skipped: AtomicU64::new(0),
            tallies: Mutex::new(Tallies::default()),
        }
    }

    #[inline]
    pub fn record_processed_file(&self) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_skipped_file(&self) {
        self.files_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a skipped file and keeps `reason` for the skipped-files report.
    #[inline]
    pub fn record_skipped_file_with_reason(&self, path: &str, reason: impl Into<String>) {
        self.record_skipped_file();
        self.lock_tallies().skipped.push(SkippedFile {
            path: path.to_owned(),
            reason: reason.into(),
        });
    }

    #[inline]
    pub fn record_directory_visited(&self) {
        self.directories_visited.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds `count` to the running total. The max-token record moves only
    /// when `count` is strictly greater, so on a tie the earlier path stays.
    #[inline]
    pub fn record_token_count(&self, count: u64, path: &str) {
        self.lock_tallies().add_tokens(count, path);
    }

    /// Same as [`RunStats::record_token_count`], and also keeps the file's
    /// count and size for the per-file report.
    #[inline]
    pub fn record_file_tokens(&self, path: &str, tokens: u64, bytes: u64) {
        let mut tallies = self.lock_tallies();
        tallies.add_tokens(tokens, path);
        tallies.files.push(FileTokens {
            path: path.to_owned(),
            tokens,
            bytes,
        });
    }

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let tallies = self.lock_tallies();

        StatsSnapshot {
            output_file: self.output_file.clone(),
            directories_visited: self.directories_visited.load(Ordering::Relaxed),
            files_processed: self.files_processed.load(Ordering::Relaxed),
            files_skipped: self.files_skipped.load(Ordering::Relaxed),
            total_tokens: tallies.total,
            max_tokens: tallies.max,
            max_tokens_file: tallies.max_path.clone(),
            file_tokens: tallies.files.clone(),
            skipped_files: tallies.skipped.clone(),
            elapsed: self.started.elapsed(),
        }
    }

    fn lock_tallies(&self) -> MutexGuard<'_, Tallies> {
        self.tallies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
