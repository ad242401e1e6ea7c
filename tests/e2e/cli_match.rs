//! End-to-end tests for `testplan match`.

use std::io::{self, Write};
use std::process::{Command, Stdio};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn testplan() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_testplan"));
    command.env_remove("TESTPLAN_LISTER").env_remove("TESTPLAN_LOG_LEVEL");
    command
}

#[test]
fn prints_matching_arguments() -> TestResult {
    let output = testplan()
        .args(["match", "-q", "--pattern", "**/*.rb", "a/b.rb", "c.rb", "a/.x/d.rb"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a/b.rb\n");
    Ok(())
}

#[test]
fn reads_paths_from_stdin() -> TestResult {
    let mut child = testplan()
        .args(["match", "-q", "--pattern", "lib/*.rb", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("stdin not piped"))?
        .write_all(b"lib/a.rb\nlib/x/b.rb\n\n")?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        body["results"],
        serde_json::json!([
            {"path": "lib/a.rb", "matched": true},
            {"path": "lib/x/b.rb", "matched": false},
        ])
    );
    Ok(())
}

#[test]
fn bad_escape_is_reported() -> TestResult {
    let output = testplan()
        .args(["match", "-q", "--pattern", "a\\q", "aq"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("glob:bad_escape"));
    Ok(())
}
