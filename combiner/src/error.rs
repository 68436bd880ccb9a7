// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CombinerError>;

#[derive(Error, Debug)]
pub enum CombinerError {
    #[error("Invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Input directory does not exist: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Input path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to write output file: {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read config file: {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file: {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to read ignore file: {}", path.display())]
    IgnoreFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File content is not valid UTF-8: {path}")]
    NonUtf8Content { path: String },
}
