//! Generate command handler.

use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, render_json};
use crate::{CliOutput, format_error_output};
use std::fmt::Write as _;
use testplan_infra::{LocalPlanOptions, run_generate_local};

/// Run the generate command.
pub fn run_generate(mode: OutputMode, options: &LocalPlanOptions) -> Result<CliOutput, CliError> {
    let output = match run_generate_local(options) {
        Ok(output) => output,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_json() {
        render_json(&serde_json::json!({
            "status": "ok",
            "profile": output.profile,
            "config": output.config_source.display().to_string(),
            "plan": output.destination,
            "filesListed": output.files_listed,
            "tests": output.plan.tests.len(),
            "commands": output.plan.commands.len(),
            "expandedFiles": output.plan.expanded_file_count(),
        }))?
    } else {
        let mut out = String::new();
        let _ = writeln!(out, "profile: {}", output.profile);
        let _ = writeln!(out, "config: {}", output.config_source.display());
        let _ = writeln!(out, "files listed: {}", output.files_listed);
        let _ = writeln!(out, "tests: {}", output.plan.tests.len());
        let _ = writeln!(
            out,
            "parallel commands: {} ({} files)",
            output.plan.commands.len(),
            output.plan.expanded_file_count()
        );
        let _ = writeln!(out, "plan: {}", output.destination);
        out
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
