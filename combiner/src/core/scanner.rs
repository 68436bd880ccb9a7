
use crate::core::ignore::Patterns;
use crate::error::Result;
use crate::models::{AcceptedFile, RunStats};
use crate::utils::{ensure_directory, is_hidden, relative_path};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

pub const NOT_UTF8_REASON: &str = "not valid UTF-8";

/// Walks a directory tree and collects every text file that survives the
/// ignore rules.
///
/// Entries are visited depth-first and sorted by file name inside each
/// directory, so the result order is stable for a given tree.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    ignore: &'a Patterns,
    include: Option<&'a Patterns>,
    skip_hidden: bool,
}

impl<'a> Scanner<'a> {
    #[inline]
    #[must_use]
    pub const fn new(ignore: &'a Patterns) -> Self {
        Self {
            ignore,
            include: None,
            skip_hidden: false,
        }
    }

    /// Only files matching `include` are collected. Directories are never
    /// pruned by it. An empty set is treated as "no include filter".
    #[inline]
    #[must_use]
    pub fn with_include(mut self, include: &'a Patterns) -> Self {
        self.include = (!include.is_empty()).then_some(include);
        self
    }

    /// Drops any entry whose own name starts with `.`, at any depth.
    #[inline]
    #[must_use]
    pub const fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Collects accepted files under `root`, updating `stats` as it goes.
    ///
    /// Ignored entries are dropped without touching any counter; an ignored
    /// directory is not descended into. Files that cannot be read are
    /// dropped silently (debug log only). Files that are not valid UTF-8
    /// count as skipped. Walk errors on single entries are logged and the
    /// walk carries on.
    ///
    /// # Errors
    ///
    /// Returns [`CombinerError::MissingInput`](crate::error::CombinerError::MissingInput) or
    /// [`CombinerError::NotADirectory`](crate::error::CombinerError::NotADirectory) if `root` is not a usable directory.
    #[inline]
    pub fn collect(&self, root: &Path, stats: &RunStats) -> Result<Vec<AcceptedFile>> {
        ensure_directory(root)?;

        let mut accepted = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_filtered(root, e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "Error accessing path");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                stats.record_directory_visited();
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let relative = relative_path(root, entry.path());
            if self.include.is_some_and(|include| !include.matches(&relative)) {
                debug!(path = %relative, "not included");
                continue;
            }

            let contents = match fs::read(entry.path()) {
                Ok(contents) => contents,
                Err(err) => {
                    debug!(path = %relative, error = %err, "Error reading file");
                    continue;
                }
            };

            if std::str::from_utf8(&contents).is_err() {
                debug!(path = %relative, "Skipping file: {NOT_UTF8_REASON}");
                stats.record_skipped_file_with_reason(&relative, NOT_UTF8_REASON);
                continue;
            }

            debug!(path = %relative, "File");
            stats.record_processed_file();
            accepted.push(AcceptedFile::new(relative, contents));
        }

        Ok(accepted)
    }

    fn is_filtered(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        if self.skip_hidden && is_hidden(entry) {
            debug!(path = %entry.path().display(), "hidden");
            return true;
        }

        let relative = relative_path(root, entry.path());
        if self.ignore.matches(&relative) {
            debug!(path = %relative, "ignored");
            return true;
        }
        false
    }
}

/// Walks `root` with `ignore` and no other filters.
///
/// # Errors
///
/// See [`Scanner::collect`].
#[inline]
pub fn collect_files(root: &Path, ignore: &Patterns, stats: &RunStats) -> Result<Vec<AcceptedFile>> {
    Scanner::new(ignore).collect(root, stats)
}
