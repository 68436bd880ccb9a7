// src/models/accepted_file.rs

/// A file that passed every filter and holds valid UTF-8.
///
/// `path` is relative to the scan root and always uses `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    pub path: String,
    pub contents: Vec<u8>,
}

impl AcceptedFile {
    #[inline]
    #[must_use]
    pub const fn new(path: String, contents: Vec<u8>) -> Self {
        Self { path, contents }
    }
}
