// src/config.rs
use crate::cli::Args;
use crate::core::ignore::load_ignore_file;
use crate::core::tokenizer::{DEFAULT_ENCODING_NAME, Encoding};
use crate::error::{CombinerError, Result};
use crate::utils::{ensure_directory, normalize_lexically, relative_path};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".combiner.toml";
pub const DEFAULT_OUTPUT: &str = "combined_output.txt";
pub const HIDDEN_PATTERN: &str = ".*";

/// Contents of a `.combiner.toml` file. Every field is optional.
///
/// ```toml
/// output = "context.txt"
/// tokenizer = "cl100k_base"
/// include_hidden = false
/// ignore = ["target", "*.lock"]
/// include = ["*.rs", "*.toml"]
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub output: Option<PathBuf>,
    pub tokenizer: Option<String>,
    pub include_hidden: Option<bool>,
    pub ignore: Vec<String>,
    pub include: Vec<String>,
}

impl ConfigFile {
    /// # Errors
    ///
    /// Fails if `path` cannot be read or is not valid TOML for this schema.
    #[inline]
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CombinerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CombinerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Finds the nearest `.combiner.toml` at or above `dir`.
    ///
    /// # Errors
    ///
    /// Fails if a config file is found but cannot be loaded.
    #[inline]
    pub fn discover(dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        let mut visited = HashSet::new();
        let mut current_dir = Some(dir);

        while let Some(candidate) = current_dir {
            if !visited.insert(candidate.to_path_buf()) {
                break;
            }
            let config_file = candidate.join(CONFIG_FILE_NAME);
            if config_file.is_file() {
                let config = Self::from_path(&config_file)?;
                return Ok(Some((config_file, config)));
            }
            current_dir = candidate.parent();
        }

        Ok(None)
    }
}

/// Everything one run needs, after merging defaults, the config file, the
/// ignore file and the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub directory: PathBuf,
    pub output: PathBuf,
    pub encoding: Encoding,
    pub include_hidden: bool,
    pub ignore_patterns: Vec<String>,
    pub include_patterns: Vec<String>,
}

impl Settings {
    /// Command-line values win over config values, which win over
    /// defaults. Pattern lists are concatenated in the order ignore file,
    /// config file, command line, then the implicit patterns.
    ///
    /// # Errors
    ///
    /// Fails if the input directory is missing, or if an ignore or config
    /// file exists but cannot be loaded.
    #[inline]
    pub fn resolve(args: &Args) -> Result<Self> {
        let directory = args.directory.clone();
        ensure_directory(&directory)?;
        let search_root = std::path::absolute(&directory).unwrap_or_else(|_| directory.clone());

        let (config_path, config) = match &args.config {
            Some(path) => (Some(path.clone()), ConfigFile::from_path(path)?),
            None => ConfigFile::discover(&search_root)?
                .map_or((None, ConfigFile::default()), |(path, config)| {
                    (Some(path), config)
                }),
        };
        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "using config file");
        }

        let output = args
            .output
            .clone()
            .or(config.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let encoding = Encoding::from_name(
            args.tokenizer
                .as_deref()
                .or(config.tokenizer.as_deref())
                .unwrap_or(DEFAULT_ENCODING_NAME),
        );
        let include_hidden = args.include_hidden || config.include_hidden.unwrap_or(false);

        let mut ignore_patterns = load_ignore_file(&search_root)?;
        ignore_patterns.extend(config.ignore);
        ignore_patterns.extend(args.ignore.iter().cloned());
        ignore_patterns.extend(implicit_patterns(
            &directory,
            &output,
            config_path.as_deref(),
            include_hidden,
        ));

        let mut include_patterns = config.include;
        include_patterns.extend(args.include.iter().cloned());

        Ok(Self {
            directory,
            output,
            encoding,
            include_hidden,
            ignore_patterns,
            include_patterns,
        })
    }
}

/// The output file (as given, and relative to the root when it lives under
/// it), the config file when it lives under the root, and `.*` unless hidden
/// files are wanted.
fn implicit_patterns(
    root: &Path,
    output: &Path,
    config_path: Option<&Path>,
    include_hidden: bool,
) -> Vec<String> {
    let mut patterns = vec![output.to_string_lossy().into_owned()];
    let inside_root = std::iter::once(output)
        .chain(config_path)
        .filter_map(|path| relative_to_root(root, path))
        .collect::<Vec<_>>();
    for relative in inside_root {
        if !patterns.contains(&relative) {
            patterns.push(relative);
        }
    }
    if !include_hidden {
        patterns.push(HIDDEN_PATTERN.to_owned());
    }
    patterns
}

fn relative_to_root(root: &Path, path: &Path) -> Option<String> {
    let root = normalize_lexically(&std::path::absolute(root).ok()?);
    let path = normalize_lexically(&std::path::absolute(path).ok()?);
    if !path.starts_with(&root) {
        return None;
    }
    let relative = relative_path(&root, &path);
    (!relative.is_empty()).then_some(relative)
}
