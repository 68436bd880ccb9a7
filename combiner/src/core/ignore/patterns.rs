// src/core/ignore/patterns.rs
use crate::error::{CombinerError, Result};
use regex::Regex;
use std::borrow::Cow;

/// Regex fragment substituted for each interior `*`: any run of characters
/// that stays inside one path segment.
const SEGMENT_WILDCARD: &str = "[^/]*";

/// A compiled set of path patterns.
///
/// Every pattern lands in exactly one of three buckets, decided by where its
/// `*` sits:
/// - `*suffix` matches paths ending with `suffix`
/// - `prefix*` matches paths starting with `prefix`
/// - `a*b` (interior wildcard) becomes an anchored regex where `*` cannot
///   cross a `/`
/// - a literal with no `*` is stored as a prefix, so `build` matches `build`,
///   `build/out.o` and also `builder.rs`
///
/// A path is matched if any bucket matches it. There is no negation.
#[derive(Debug, Default, Clone)]
pub struct Patterns {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    rules: Vec<Regex>,
}

impl Patterns {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every pattern in `patterns` into a new set.
    ///
    /// # Errors
    ///
    /// Returns [`CombinerError::InvalidPattern`] if an interior-wildcard
    /// pattern produces a regex the engine rejects (e.g. exceeds its size
    /// limit).
    #[inline]
    pub fn compile<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Self::new();
        for pattern in patterns {
            compiled.add_pattern(pattern.as_ref())?;
        }
        Ok(compiled)
    }

    /// Classifies `pattern` and adds it to the matching bucket.
    ///
    /// Unlike ignore-file lines, the pattern is taken verbatim: no trimming,
    /// and the empty string is a valid zero-length prefix that matches
    /// every path.
    ///
    /// # Errors
    ///
    /// Returns [`CombinerError::InvalidPattern`] if the generated regex fails
    /// to compile.
    #[inline]
    pub fn add_pattern(&mut self, pattern: &str) -> Result<()> {
        if let Some(suffix) = pattern.strip_prefix('*') {
            self.suffixes.push(suffix.to_owned());
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            self.prefixes.push(prefix.to_owned());
        } else if pattern.contains('*') {
            let body = pattern
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(SEGMENT_WILDCARD);
            let rule = Regex::new(&format!("^{body}$")).map_err(|source| {
                CombinerError::InvalidPattern {
                    pattern: pattern.to_owned(),
                    source,
                }
            })?;
            self.rules.push(rule);
        } else {
            self.prefixes.push(pattern.to_owned());
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.suffixes.is_empty() && self.rules.is_empty()
    }

    /// Returns `true` if `path` starts with a stored prefix, ends with a
    /// stored suffix, or fully matches a stored rule. Backslashes in `path`
    /// are treated as `/`.
    #[inline]
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let path: Cow<'_, str> = if path.contains('\\') {
            Cow::Owned(path.replace('\\', "/"))
        } else {
            Cow::Borrowed(path)
        };

        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
            || self.suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
            || self.rules.iter().any(|rule| rule.is_match(&path))
    }
}
