// src/core/ignore.rs
pub mod loader;
pub mod patterns;

pub use loader::{IGNORE_FILE_NAME, load_ignore_file};
pub use patterns::Patterns;
