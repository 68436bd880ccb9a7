// src/core/tokenizer.rs
use crate::error::CombinerError;
use crate::models::{AcceptedFile, RunStats};
use anyhow::{Context as _, Result};
use std::fmt;
use tiktoken_rs::{CoreBPE, cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base};

pub const DEFAULT_ENCODING_NAME: &str = "p50k_base";

/// The BPE encodings the combiner can count with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    O200kBase,
    #[default]
    Cl100kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl Encoding {
    pub const ALL: [Self; 5] = [
        Self::O200kBase,
        Self::Cl100kBase,
        Self::P50kBase,
        Self::P50kEdit,
        Self::R50kBase,
    ];

    /// Looks up an encoding by its tiktoken name. Unknown names fall back to
    /// [`Encoding::Cl100kBase`].
    #[inline]
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.name() == name)
            .unwrap_or_else(|| {
                tracing::debug!(name, fallback = Self::default().name(), "unknown encoding");
                Self::default()
            })
    }

    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::O200kBase => "o200k_base",
            Self::Cl100kBase => "cl100k_base",
            Self::P50kBase => "p50k_base",
            Self::P50kEdit => "p50k_edit",
            Self::R50kBase => "r50k_base",
        }
    }
}

impl fmt::Display for Encoding {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct Tokenizer {
    encoding: Encoding,
    bpe: CoreBPE,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl Tokenizer {
    /// Loads the BPE ranks for `encoding`.
    ///
    /// # Errors
    ///
    /// Returns an error if tiktoken cannot build the encoder.
    #[inline]
    pub fn new(encoding: Encoding) -> Result<Self> {
        let bpe = match encoding {
            Encoding::O200kBase => o200k_base(),
            Encoding::Cl100kBase => cl100k_base(),
            Encoding::P50kBase => p50k_base(),
            Encoding::P50kEdit => p50k_edit(),
            Encoding::R50kBase => r50k_base(),
        }
        .with_context(|| format!("Failed to load {encoding} tokenizer"))?;
        Ok(Self { encoding, bpe })
    }

    #[inline]
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of tokens in `text`; special tokens are encoded as plain text.
    #[inline]
    #[must_use]
    pub fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Counts tokens for every file, in order, feeding each count and file
    /// size into `stats`.
    ///
    /// # Errors
    ///
    /// Fails with [`CombinerError::NonUtf8Content`] if a file is not valid
    /// UTF-8. The scanner only accepts valid text, so this means the files
    /// did not come from it.
    #[inline]
    pub fn process_files(&self, files: &[AcceptedFile], stats: &RunStats) -> Result<()> {
        for file in files {
            let text = std::str::from_utf8(&file.contents).map_err(|_| {
                CombinerError::NonUtf8Content {
                    path: file.path.clone(),
                }
            })?;
            let count = u64::try_from(self.count_tokens(text)).unwrap_or(u64::MAX);
            let bytes = u64::try_from(file.contents.len()).unwrap_or(u64::MAX);
            stats.record_file_tokens(&file.path, count, bytes);
        }
        Ok(())
    }
}
