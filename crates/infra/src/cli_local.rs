//! Local CLI orchestration helpers.

use crate::InfraResult;
use crate::lister_factory::build_file_lister;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use testplan_adapters::{
    DEFAULT_PLAN_FILE, JsonLogger, JsonPlanWriter, LogSink, StderrLogSink, TracingLogger,
    YamlConfigLoader,
};
use testplan_app::{
    CheckProfileDeps, CheckProfileInput, CheckProfileOutput, GeneratePlanDeps, GeneratePlanInput,
    GeneratePlanOutput, check_profile, generate_plan,
};
use testplan_config::{ListerKind, PlanEnv};
use testplan_ports::{LogLevel, LoggerPort};

/// Where port-level log events go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// Drop events.
    #[default]
    Off,
    /// One JSON object per line on stderr.
    Json,
    /// Forward to the installed `tracing` subscriber.
    Tracing,
}

/// Options for a local plan run, after flag parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPlanOptions {
    /// Project root.
    pub root: PathBuf,
    /// Explicit CI config path.
    pub config_path: Option<PathBuf>,
    /// Explicit profile name.
    pub profile: Option<String>,
    /// Plan output path; relative paths resolve against `root`.
    pub output_path: Option<PathBuf>,
    /// File lister; `find` when unset.
    pub lister: Option<ListerKind>,
    /// Log destination.
    pub log_output: LogOutput,
    /// Minimum log level; `info` when unset.
    pub log_level: Option<LogLevel>,
}

impl LocalPlanOptions {
    /// Options for `root` with everything else unset.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_path: None,
            profile: None,
            output_path: None,
            lister: None,
            log_output: LogOutput::Off,
            log_level: None,
        }
    }

    /// Fill unset options from env overrides. Values already set win.
    #[must_use]
    pub fn with_env(mut self, env: &PlanEnv) -> Self {
        if self.profile.is_none() {
            self.profile = env.profile.as_deref().map(str::to_owned);
        }
        if self.config_path.is_none() {
            self.config_path.clone_from(&env.config_path);
        }
        if self.output_path.is_none() {
            self.output_path.clone_from(&env.output_path);
        }
        if self.lister.is_none() {
            self.lister = env.lister;
        }
        if self.log_level.is_none() {
            self.log_level = env.log_level.as_deref().and_then(LogLevel::parse);
        }
        self
    }

    /// Resolved plan destination.
    #[must_use]
    pub fn plan_path(&self) -> PathBuf {
        resolve_output_path(&self.root, self.output_path.as_deref())
    }
}

/// Generate and write the plan for a local project.
pub fn run_generate_local(options: &LocalPlanOptions) -> InfraResult<GeneratePlanOutput> {
    let lister = options.lister.unwrap_or_default();
    let plan_path = options.plan_path();
    tracing::debug!(
        root = %options.root.display(),
        lister = %lister,
        output = %plan_path.display(),
        "wiring plan generation"
    );

    let deps = GeneratePlanDeps {
        config_loader: Arc::new(YamlConfigLoader),
        file_lister: build_file_lister(lister),
        plan_writer: Arc::new(JsonPlanWriter::new(plan_path)),
        logger: build_logger(options.log_output, options.log_level),
    };
    generate_plan(
        &deps,
        GeneratePlanInput {
            root: options.root.clone(),
            config_path: options.config_path.clone(),
            profile: options.profile.clone(),
        },
    )
}

/// Validate the selected profile of a local project.
pub fn run_check_local(options: &LocalPlanOptions) -> InfraResult<CheckProfileOutput> {
    let deps = CheckProfileDeps {
        config_loader: Arc::new(YamlConfigLoader),
        logger: build_logger(options.log_output, options.log_level),
    };
    check_profile(
        &deps,
        CheckProfileInput {
            root: options.root.clone(),
            config_path: options.config_path.clone(),
            profile: options.profile.clone(),
        },
    )
}

/// Plan destination: `output` (relative to `root` unless absolute), or the default file.
#[must_use]
pub fn resolve_output_path(root: &Path, output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| root.join(DEFAULT_PLAN_FILE), |path| root.join(path))
}

/// Build the logger for `output`, or `None` when logging is off.
#[must_use]
pub fn build_logger(output: LogOutput, level: Option<LogLevel>) -> Option<Arc<dyn LoggerPort>> {
    match output {
        LogOutput::Off => None,
        LogOutput::Json => {
            let sink: Arc<dyn LogSink> = Arc::new(StderrLogSink);
            Some(Arc::new(
                JsonLogger::new(sink).with_min_level(level.unwrap_or(LogLevel::Info)),
            ))
        },
        LogOutput::Tracing => Some(Arc::new(TracingLogger::new())),
    }
}
