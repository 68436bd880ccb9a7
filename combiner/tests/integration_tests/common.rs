// tests/integration_tests/common.rs
use anyhow::Result;
use combiner::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const OUTPUT_NAME: &str = "combined.txt";

pub fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Three text files (one nested), one hidden file and one non-UTF-8 file.
pub fn setup_test_directory() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    create_test_file(temp_dir.path(), "README.md", b"# Project\n\nHello there.\n")?;
    create_test_file(temp_dir.path(), "main.go", b"package main\n\nfunc main() {}\n")?;
    create_test_file(
        temp_dir.path(),
        "src/lib.rs",
        b"pub fn answer() -> u32 {\n    42\n}\n",
    )?;
    create_test_file(temp_dir.path(), ".env", b"SECRET=hunter2\n")?;
    create_test_file(temp_dir.path(), "logo.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xd8])?;

    Ok(temp_dir)
}

pub fn args_for(dir: &Path) -> Args {
    Args {
        directory: dir.to_path_buf(),
        output: Some(output_path(dir)),
        tokenizer: None,
        ignore: Vec::new(),
        include: Vec::new(),
        include_hidden: false,
        verbose: false,
        config: None,
    }
}

pub fn output_path(dir: &Path) -> PathBuf {
    dir.join(OUTPUT_NAME)
}

/// Splits a combined output file back into `(path, content)` pairs.
pub fn parse_combined(combined: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut rest = combined;
    while let Some(header_end) = rest.find(" ---\n") {
        let path = rest
            .get(..header_end)
            .and_then(|header| header.strip_prefix("--- File: "))
            .unwrap_or_default()
            .to_owned();
        rest = rest.get(header_end + 5..).unwrap_or_default();
        let body_end = rest
            .find("\n\n--- File: ")
            .unwrap_or_else(|| rest.len().saturating_sub(2));
        entries.push((path, rest.get(..body_end).unwrap_or_default().to_owned()));
        rest = rest.get(body_end + 2..).unwrap_or_default();
    }
    entries
}
