//! End-to-end tests for `testplan check`.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn project(config: &str) -> io::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    std::fs::create_dir_all(dir.path().join("config"))?;
    std::fs::write(dir.path().join("config/solano.yml"), config)?;
    Ok(dir)
}

fn check(root: &Path, extra: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_testplan"))
        .arg("check")
        .arg("--root")
        .arg(root)
        .args(extra)
        .arg("--quiet")
        .env_remove("TESTPLAN_PROFILE")
        .env_remove("TESTPLAN_CONFIG")
        .env_remove("TESTPLAN_LOG_LEVEL")
        .output()
}

#[test]
fn valid_profile_reports_counts() -> TestResult {
    let dir = project(
        "profiles:\n  ci:\n    test_pattern: ['test/**/*_test.rb']\n    tests:\n      - mode: parallel\n        files: 'test/**'\n",
    )?;
    let output = check(dir.path(), &["--profile", "ci", "--format", "json"])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["patterns"], 1);
    assert_eq!(summary["parallel"], 1);
    Ok(())
}

#[test]
fn char_class_glob_fails_check() -> TestResult {
    let dir = project("profiles:\n  ci:\n    test_pattern: 'test/[ab]*.rb'\n")?;
    let output = check(dir.path(), &["--profile", "ci", "--format", "json"])?;
    assert_eq!(output.status.code(), Some(2));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"]["code"], "unsupported_char_class");
    assert_eq!(body["error"]["metadata"]["glob"], "test/[ab]*.rb");
    Ok(())
}

#[test]
fn malformed_parallel_entry_names_the_entry() -> TestResult {
    let dir = project("profiles:\n  ci:\n    tests:\n      - mode: parallel\n        files: []\n")?;
    let output = check(dir.path(), &["--profile", "ci"])?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("code: pattern:invalid_parallel_files"));
    assert!(stderr.contains("entry_index: 0"));
    Ok(())
}

#[test]
fn missing_config_is_expected_failure() -> TestResult {
    let dir = tempfile::tempdir()?;
    let output = check(dir.path(), &["--profile", "ci"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("config:configuration_missing"));
    Ok(())
}

#[test]
fn invalid_env_value_fails_fast() -> TestResult {
    let dir = project("profiles:\n  ci: {}\n")?;
    let output = Command::new(env!("CARGO_BIN_EXE_testplan"))
        .args(["check", "--profile", "ci", "-q", "--root"])
        .arg(dir.path())
        .env("TESTPLAN_LISTER", "rsync")
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("config:invalid_env_enum"));
    Ok(())
}
