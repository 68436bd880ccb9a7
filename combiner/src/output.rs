// src/output.rs
use crate::error::{CombinerError, Result};
use crate::models::AcceptedFile;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered handle on the combined output file.
///
/// Created before the scan so an unwritable path fails the run early.
/// The file is closed when the writer is dropped.
#[derive(Debug)]
pub struct OutputWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputWriter {
    /// # Errors
    ///
    /// Returns [`CombinerError::Output`] if the file cannot be created.
    #[inline]
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| CombinerError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Writes every file in order and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`CombinerError::Output`] on any write or flush failure.
    #[inline]
    pub fn write_files(mut self, files: &[AcceptedFile]) -> Result<()> {
        let result = files
            .iter()
            .try_for_each(|file| write_entry(&mut self.writer, file))
            .and_then(|()| self.writer.flush());
        result.map_err(|source| CombinerError::Output {
            path: self.path,
            source,
        })
    }
}

/// One block of the combined file: a header line, the raw bytes, a newline
/// and a blank separator line.
///
/// # Errors
///
/// Propagates any error from `out`.
#[inline]
pub fn write_entry<W: Write>(out: &mut W, file: &AcceptedFile) -> io::Result<()> {
    writeln!(out, "--- File: {} ---", file.path)?;
    out.write_all(&file.contents)?;
    out.write_all(b"\n\n")
}
