//! Match command handler.

use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, render_json};
use crate::{CliOutput, format_error_output};
use testplan_infra::match_paths;

/// Run the match command over `paths`.
///
/// Text output lists matching paths only, one per line, so it can be piped.
pub fn run_match(mode: OutputMode, glob: &str, paths: &[String]) -> Result<CliOutput, CliError> {
    let outcomes = match match_paths(glob, paths) {
        Ok(outcomes) => outcomes,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_json() {
        let results: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|outcome| serde_json::json!({ "path": outcome.path, "matched": outcome.matched }))
            .collect();
        render_json(&serde_json::json!({ "glob": glob, "results": results }))?
    } else {
        outcomes
            .iter()
            .filter(|outcome| outcome.matched)
            .map(|outcome| format!("{}\n", outcome.path))
            .collect()
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
