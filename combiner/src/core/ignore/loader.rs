// src/core/ignore/loader.rs
use crate::error::{CombinerError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const IGNORE_FILE_NAME: &str = ".combinerignore";

/// Reads ignore patterns from the nearest `.combinerignore`, starting at
/// `dir` and walking up through its parents. Only the first file found is
/// used.
///
/// Lines are trimmed; blank lines and `#` comments are dropped. The
/// remaining lines are returned as raw pattern strings in file order.
///
/// # Errors
///
/// Returns [`CombinerError::IgnoreFileRead`] if a `.combinerignore` exists
/// but cannot be read.
#[inline]
pub fn load_ignore_file(dir: &Path) -> Result<Vec<String>> {
    let mut visited = HashSet::new();
    let mut current_dir = Some(dir);

    while let Some(candidate) = current_dir {
        if !visited.insert(candidate.to_path_buf()) {
            break;
        }

        let ignore_file = candidate.join(IGNORE_FILE_NAME);
        if ignore_file.is_file() {
            let content =
                fs::read_to_string(&ignore_file).map_err(|source| CombinerError::IgnoreFileRead {
                    path: ignore_file.clone(),
                    source,
                })?;
            tracing::debug!(path = %ignore_file.display(), "loaded ignore file");
            return Ok(parse_ignore_lines(&content));
        }

        current_dir = candidate.parent();
    }

    Ok(Vec::new())
}

fn parse_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}
