//! Check command handler.

use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, render_json};
use crate::{CliOutput, format_error_output};
use testplan_infra::{LocalPlanOptions, run_check_local};

/// Run the check command.
pub fn run_check(mode: OutputMode, options: &LocalPlanOptions) -> Result<CliOutput, CliError> {
    let output = match run_check_local(options) {
        Ok(output) => output,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_json() {
        render_json(&serde_json::json!({
            "status": "ok",
            "profile": output.profile,
            "config": output.config_source.display().to_string(),
            "patterns": output.pattern_count,
            "tests": output.test_entries,
            "parallel": output.parallel_entries,
        }))?
    } else {
        format!(
            "status: ok\nprofile: {}\nconfig: {}\npatterns: {}\ntests: {} ({} parallel)\n",
            output.profile,
            output.config_source.display(),
            output.pattern_count,
            output.test_entries,
            output.parallel_entries,
        )
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
