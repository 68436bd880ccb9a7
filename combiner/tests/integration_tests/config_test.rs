// tests/integration_tests/config_test.rs
use super::common::{args_for, create_test_file, output_path, setup_test_directory};
use anyhow::Result;
use combiner::run;
use std::fs;

#[test]
fn test_config_file_patterns_apply() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(
        temp_dir.path(),
        ".combiner.toml",
        b"ignore = [\"README\"]\ntokenizer = \"o200k_base\"\n",
    )?;

    let snapshot = run(&args_for(temp_dir.path()))?;

    assert_eq!(snapshot.files_processed, 2);
    let combined = fs::read_to_string(output_path(temp_dir.path()))?;
    assert!(!combined.contains("README.md"));
    Ok(())
}

#[test]
fn test_ignore_file_patterns_apply() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), ".combinerignore", b"# no go\n*.go\n")?;

    let snapshot = run(&args_for(temp_dir.path()))?;

    assert_eq!(snapshot.files_processed, 2);
    assert_eq!(snapshot.files_skipped, 1);
    Ok(())
}

#[test]
fn test_explicit_config_inside_root_is_not_collected() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), "combiner.toml", b"include_hidden = true\n")?;
    let mut args = args_for(temp_dir.path());
    args.config = Some(temp_dir.path().join("combiner.toml"));

    let snapshot = run(&args)?;

    assert_eq!(snapshot.files_processed, 4, "three text files plus .env");
    let combined = fs::read_to_string(output_path(temp_dir.path()))?;
    assert!(!combined.contains("--- File: combiner.toml ---"));
    Ok(())
}

#[test]
fn test_malformed_config_is_fatal() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), ".combiner.toml", b"ignore = \"not a list\"\n")?;

    let err = run(&args_for(temp_dir.path())).expect_err("config must fail to parse");
    assert!(format!("{err:#}").contains("Failed to parse config file"));
    Ok(())
}
