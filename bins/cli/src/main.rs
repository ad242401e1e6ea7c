//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::{run_check, run_generate, run_match};
use error::{CliError, ExitCode};
use format::{LogFormat, OutputArgs, OutputMode, render_json};
use std::fmt::Write as _;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use testplan_config::ListerKind;
use testplan_infra::{InfraError, LocalPlanOptions, LogOutput, load_std_env};
use testplan_ports::LogLevel;

/// Env var holding a `tracing` filter for text logs.
const LOG_FILTER_ENV: &str = "TESTPLAN_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "testplan",
    version,
    about = "Generate CI test plans from profile patterns",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ProjectArgs {
    /// Project root (defaults to current directory).
    #[arg(long)]
    root: Option<PathBuf>,
    /// CI config path, relative to the root. Defaults to the first of
    /// `solano.yml`, `config/solano.yml`, `tddium.yml`, `config/tddium.yml`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Profile name. Defaults to `TESTPLAN_PROFILE`, then `next_profile`
    /// in `solano-plan-variables.json`.
    #[arg(long)]
    profile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListerArg {
    /// Run `find` in the project root.
    Find,
    /// Walk the tree in-process.
    Walk,
}

impl From<ListerArg> for ListerKind {
    fn from(value: ListerArg) -> Self {
        match value {
            ListerArg::Find => Self::Find,
            ListerArg::Walk => Self::Walk,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Select tests for a profile and write the plan.
    Generate {
        #[command(flatten)]
        project: ProjectArgs,
        /// Plan output path (defaults to `test_list.json` in the root).
        #[arg(long)]
        output: Option<PathBuf>,
        /// File lister.
        #[arg(long, value_enum)]
        lister: Option<ListerArg>,
    },
    /// Validate a profile and compile every pattern in it.
    Check {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Report which paths a glob matches.
    Match {
        /// Glob to compile.
        #[arg(long)]
        pattern: String,
        /// Paths to test; read from stdin, one per line, when omitted.
        paths: Vec<String>,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli, mode: OutputMode) -> Result<CliOutput, CliError> {
    let env = match load_std_env() {
        Ok(env) => env,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    let log_level = cli
        .output
        .log_level
        .map(LogLevel::from)
        .or_else(|| env.log_level.as_deref().and_then(LogLevel::parse));
    let log_output = init_logging(&cli.output, log_level);

    match &cli.command {
        Commands::Generate {
            project,
            output,
            lister,
        } => {
            let mut options = project_options(project, log_output, log_level)?;
            options.output_path.clone_from(output);
            options.lister = lister.map(ListerKind::from);
            run_generate(mode, &options.with_env(&env))
        },
        Commands::Check { project } => {
            let options = project_options(project, log_output, log_level)?;
            run_check(mode, &options.with_env(&env))
        },
        Commands::Match { pattern, paths } => {
            if paths.is_empty() {
                run_match(mode, pattern, &read_stdin_lines()?)
            } else {
                run_match(mode, pattern, paths)
            }
        },
    }
}

fn project_options(
    project: &ProjectArgs,
    log_output: LogOutput,
    log_level: Option<LogLevel>,
) -> Result<LocalPlanOptions, CliError> {
    let root = match project.root.as_ref() {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let mut options = LocalPlanOptions::new(root);
    options.config_path.clone_from(&project.config);
    options.profile.clone_from(&project.profile);
    options.log_output = log_output;
    options.log_level = log_level;
    Ok(options)
}

/// Install the text subscriber when needed and pick the port logger.
fn init_logging(args: &OutputArgs, level: Option<LogLevel>) -> LogOutput {
    if args.quiet {
        return LogOutput::Off;
    }
    match args.log_format {
        LogFormat::Json => LogOutput::Json,
        LogFormat::Text => {
            init_tracing(level.unwrap_or(LogLevel::Warn));
            LogOutput::Tracing
        },
    }
}

fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

pub(crate) fn format_error_output(mode: OutputMode, error: &InfraError) -> CliOutput {
    let exit_code = ExitCode::for_envelope(error);
    if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": error,
        });
        let stdout = render_json(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"message\":\"internal error\"}}\n".to_owned()
        });
        return CliOutput {
            stdout,
            stderr: String::new(),
            exit_code,
        };
    }

    CliOutput {
        stdout: String::new(),
        stderr: format_error_text(error),
        exit_code,
    }
}

fn format_error_text(error: &InfraError) -> String {
    let mut out = format!("error: {}\ncode: {}\n", error.message, error.code);
    for (key, value) in &error.metadata {
        let _ = writeln!(out, "  {key}: {value}");
    }
    out
}

fn read_stdin_lines() -> Result<Vec<String>, CliError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
