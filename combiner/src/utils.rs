// src/utils.rs
use crate::error::{CombinerError, Result};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Checks that `path` exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CombinerError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(CombinerError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// `path` relative to `root`, joined with `/` regardless of platform.
///
/// Non-UTF-8 components are replaced lossily; that is logged at debug level.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if let Cow::Owned(_) = relative.to_string_lossy() {
        debug!(path = %joined, "path is not valid UTF-8; using lossy form");
    }
    joined
}

/// Resolves `.` and `..` components without touching the filesystem.
/// A `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
