//! End-to-end tests for `testplan generate`.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const CONFIG: &str = r"
test_pattern: 'spec/**/*_spec.rb'
profiles:
  default:
    test_pattern:
      - exclude: 'spec/slow/**'
    tests:
      - bundle exec rubocop
      - mode: parallel
        command: bundle exec rspec
        files: 'spec/slow/**/*_spec.rb'
";

fn write(root: &Path, relative: &str, contents: &str) -> io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

fn project() -> io::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    write(dir.path(), "solano.yml", CONFIG)?;
    for file in [
        "spec/models/user_spec.rb",
        "spec/slow/import/csv_spec.rb",
        "spec/.tmp/ignored_spec.rb",
        "app/models/user.rb",
    ] {
        write(dir.path(), file, "")?;
    }
    Ok(dir)
}

fn testplan(root: &Path, args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_testplan"))
        .args(args)
        .arg("--root")
        .arg(root)
        .env_remove("TESTPLAN_PROFILE")
        .env_remove("TESTPLAN_CONFIG")
        .env_remove("TESTPLAN_OUTPUT")
        .env_remove("TESTPLAN_LISTER")
        .env_remove("TESTPLAN_LOG_LEVEL")
        .env_remove("TESTPLAN_LOG")
        .output()
}

fn read_plan(root: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(root.join("test_list.json"))?;
    assert!(text.ends_with('\n'));
    Ok(serde_json::from_str(&text)?)
}

#[test]
fn generate_writes_plan_with_walk_lister() -> TestResult {
    let dir = project()?;
    let output = testplan(
        dir.path(),
        &["generate", "--profile", "default", "--lister", "walk", "--quiet"],
    )?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("profile: default"));
    assert!(stdout.contains("tests: 1"));

    let plan = read_plan(dir.path())?;
    assert_eq!(plan["tests"], serde_json::json!(["spec/models/user_spec.rb"]));
    assert_eq!(
        plan["commands"],
        serde_json::json!([{
            "mode": "parallel",
            "command": "bundle exec rspec",
            "files": "spec/slow/**/*_spec.rb",
            "files_expanded": ["spec/slow/import/csv_spec.rb"],
        }])
    );
    Ok(())
}

#[test]
fn find_lister_matches_walk_lister() -> TestResult {
    let dir = project()?;
    let walk = testplan(dir.path(), &["generate", "--profile", "default", "--lister", "walk", "-q"])?;
    assert!(walk.status.success());
    let from_walk = read_plan(dir.path())?;

    let find = testplan(dir.path(), &["generate", "--profile", "default", "--lister", "find", "-q"])?;
    assert!(find.status.success(), "{}", String::from_utf8_lossy(&find.stderr));
    assert_eq!(read_plan(dir.path())?, from_walk);
    Ok(())
}

#[test]
fn profile_falls_back_to_plan_variables() -> TestResult {
    let dir = project()?;
    write(dir.path(), "solano-plan-variables.json", r#"{"next_profile": "default"}"#)?;
    let output = testplan(dir.path(), &["generate", "--lister", "walk", "--format", "json", "-q"])?;
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["status"], "ok");
    assert_eq!(summary["profile"], "default");
    assert_eq!(summary["commands"], 1);
    assert_eq!(summary["expandedFiles"], 1);
    Ok(())
}

#[test]
fn env_profile_is_used_when_flag_is_absent() -> TestResult {
    let dir = project()?;
    let output = Command::new(env!("CARGO_BIN_EXE_testplan"))
        .args(["generate", "--lister", "walk", "-q", "--root"])
        .arg(dir.path())
        .env("TESTPLAN_PROFILE", "default")
        .env("TESTPLAN_OUTPUT", "plan.json")
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("plan.json").is_file());
    Ok(())
}

#[test]
fn missing_profile_exits_with_expected_code() -> TestResult {
    let dir = project()?;
    let output = testplan(dir.path(), &["generate", "--profile", "nightly", "--lister", "walk", "-q"])?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: no such profile 'nightly'"));
    assert!(stderr.contains("code: config:profile_missing"));
    assert!(!dir.path().join("test_list.json").exists());
    Ok(())
}

#[test]
fn json_logs_go_to_stderr() -> TestResult {
    let dir = project()?;
    let output = testplan(
        dir.path(),
        &["generate", "--profile", "default", "--lister", "walk", "--log-format", "json"],
    )?;
    assert!(output.status.success());
    let events: Vec<String> = String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter_map(|line| line["event"].as_str().map(str::to_owned))
        .collect();
    assert_eq!(events.first().map(String::as_str), Some("plan.generate.start"));
    assert_eq!(events.last().map(String::as_str), Some("plan.generate.completed"));
    Ok(())
}
