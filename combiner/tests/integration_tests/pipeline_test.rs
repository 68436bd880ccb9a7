// tests/integration_tests/pipeline_test.rs
use super::common::{OUTPUT_NAME, args_for, create_test_file, output_path, setup_test_directory};
use anyhow::Result;
use combiner::{Encoding, Patterns, RunStats, Scanner, Tokenizer, run};
use std::fs;

#[test]
fn test_hidden_and_binary_files() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    let snapshot = run(&args_for(temp_dir.path()))?;

    assert_eq!(snapshot.files_processed, 3);
    assert_eq!(snapshot.files_skipped, 1, "only logo.png is skipped");
    assert_eq!(snapshot.directories_visited, 2);
    assert_eq!(snapshot.output_file, output_path(temp_dir.path()));
    Ok(())
}

#[test]
fn test_token_statistics_match_tokenizer() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut args = args_for(temp_dir.path());
    args.tokenizer = Some("cl100k_base".to_owned());

    let snapshot = run(&args)?;

    let tokenizer = Tokenizer::new(Encoding::Cl100kBase)?;
    let mut expected_total = 0;
    let mut expected_max = (0, None);
    for path in ["README.md", "main.go", "src/lib.rs"] {
        let text = fs::read_to_string(temp_dir.path().join(path))?;
        let count = u64::try_from(tokenizer.count_tokens(&text))?;
        expected_total += count;
        if count > expected_max.0 {
            expected_max = (count, Some(path.to_owned()));
        }
    }

    assert_eq!(snapshot.total_tokens, expected_total);
    assert_eq!(snapshot.max_tokens, expected_max.0);
    assert_eq!(snapshot.max_tokens_file, expected_max.1);
    Ok(())
}

#[test]
fn test_previous_output_is_not_collected() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), OUTPUT_NAME, b"stale output from last run")?;

    let snapshot = run(&args_for(temp_dir.path()))?;

    assert_eq!(snapshot.files_processed, 3);
    let combined = fs::read_to_string(output_path(temp_dir.path()))?;
    assert!(!combined.contains("stale output"));
    Ok(())
}

#[test]
fn test_include_hidden_collects_dotfiles() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut args = args_for(temp_dir.path());
    args.include_hidden = true;

    let snapshot = run(&args)?;

    assert_eq!(snapshot.files_processed, 4);
    let combined = fs::read_to_string(output_path(temp_dir.path()))?;
    assert!(combined.contains("--- File: .env ---"));
    Ok(())
}

#[test]
fn test_cli_ignore_patterns() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut args = args_for(temp_dir.path());
    args.ignore = vec!["*.go".to_owned(), "src".to_owned()];

    let snapshot = run(&args)?;

    assert_eq!(snapshot.files_processed, 1);
    assert_eq!(snapshot.directories_visited, 1, "src is never entered");
    Ok(())
}

#[test]
fn test_include_patterns() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut args = args_for(temp_dir.path());
    args.include = vec!["*.rs".to_owned()];

    let snapshot = run(&args)?;

    assert_eq!(snapshot.files_processed, 1);
    assert_eq!(snapshot.files_skipped, 0);
    assert_eq!(snapshot.max_tokens_file.as_deref(), Some("src/lib.rs"));
    Ok(())
}

#[test]
fn test_unwritable_output_fails_before_scanning() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut args = args_for(temp_dir.path());
    args.output = Some(temp_dir.path().join("no/such/dir/out.txt"));

    let err = run(&args).expect_err("output directory does not exist");
    assert!(format!("{err:#}").contains("Failed to write output file"));
    Ok(())
}

#[test]
fn test_missing_input_directory_fails() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let args = args_for(&temp_dir.path().join("missing"));

    let err = run(&args).expect_err("input directory does not exist");
    assert!(format!("{err:#}").contains("Input directory does not exist"));
    Ok(())
}

#[test]
fn test_scanner_and_tokenizer_share_stats() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let ignore = Patterns::compile([".*", OUTPUT_NAME])?;
    let stats = RunStats::new(output_path(temp_dir.path()));

    let files = Scanner::new(&ignore).collect(temp_dir.path(), &stats)?;
    Tokenizer::new(Encoding::P50kBase)?.process_files(&files, &stats)?;

    let snapshot = stats.snapshot();
    assert_eq!(files.len(), 3);
    assert_eq!(snapshot.files_processed, 3);
    assert!(snapshot.total_tokens >= snapshot.max_tokens);
    assert!(snapshot.max_tokens > 0);
    Ok(())
}

#[test]
fn test_skip_reasons_and_per_file_counts() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    let snapshot = run(&args_for(temp_dir.path()))?;

    assert_eq!(snapshot.skipped_files.len(), 1);
    assert_eq!(snapshot.skipped_files[0].path, "logo.png");
    assert_eq!(snapshot.skipped_files[0].reason, "not valid UTF-8");

    let paths: Vec<&str> = snapshot.file_tokens.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["README.md", "main.go", "src/lib.rs"]);
    let readme_len = fs::metadata(temp_dir.path().join("README.md"))?.len();
    assert_eq!(snapshot.file_tokens[0].bytes, readme_len);
    assert_eq!(
        snapshot.file_tokens.iter().map(|f| f.tokens).sum::<u64>(),
        snapshot.total_tokens
    );
    Ok(())
}
