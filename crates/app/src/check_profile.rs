//! Validate a profile without listing files or writing a plan.

use crate::generate_plan::{duration_ms, load_settings};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use testplan_domain::{CompiledPatternSequence, SelectionError, assign_parallel_groups};
use testplan_ports::{ConfigLoaderPort, LoggerPort, log_fields};
use testplan_shared::Result;

/// Input payload for a profile check.
#[derive(Debug, Clone)]
pub struct CheckProfileInput {
    /// Project root.
    pub root: PathBuf,
    /// Explicit CI config path.
    pub config_path: Option<PathBuf>,
    /// Explicit profile name.
    pub profile: Option<String>,
}

/// Dependencies required by a profile check.
#[derive(Clone)]
pub struct CheckProfileDeps {
    /// CI config source.
    pub config_loader: Arc<dyn ConfigLoaderPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Summary of a valid profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckProfileOutput {
    /// Checked profile.
    pub profile: String,
    /// Config file that was read.
    pub config_source: PathBuf,
    /// Number of top-level selection patterns.
    pub pattern_count: usize,
    /// Number of `tests` entries.
    pub test_entries: usize,
    /// How many of those entries run in parallel.
    pub parallel_entries: usize,
}

/// Check that the profile resolves and every glob in it compiles.
#[tracing::instrument(name = "check_profile", skip_all, fields(root = %input.root.display()))]
pub fn check_profile(
    deps: &CheckProfileDeps,
    input: CheckProfileInput,
) -> Result<CheckProfileOutput> {
    let started_at = Instant::now();
    if let Some(logger) = deps.logger.as_ref() {
        logger.info("plan.check.start", "Profile check started", None);
    }

    let result = (|| -> Result<CheckProfileOutput> {
        let (config_source, settings) = load_settings(
            deps.config_loader.as_ref(),
            &input.root,
            input.config_path.as_deref(),
            input.profile.as_deref(),
        )?;
        let sequence = CompiledPatternSequence::compile(&settings.test_patterns, None)
            .map_err(SelectionError::from)?;
        let commands = assign_parallel_groups::<&str>(&settings.tests, &[])?;

        Ok(CheckProfileOutput {
            profile: settings.profile,
            config_source,
            pattern_count: sequence.len(),
            test_entries: commands.len(),
            parallel_entries: commands.iter().filter(|command| command.is_parallel()).count(),
        })
    })();

    match result {
        Ok(output) => {
            if let Some(logger) = deps.logger.as_ref() {
                logger.info(
                    "plan.check.completed",
                    "Profile check completed",
                    Some(log_fields([
                        ("profile", output.profile.as_str().into()),
                        ("patterns", output.pattern_count.into()),
                        ("parallel", output.parallel_entries.into()),
                        ("durationMs", duration_ms(started_at).into()),
                    ])),
                );
            }
            Ok(output)
        },
        Err(error) => {
            if let Some(logger) = deps.logger.as_ref() {
                logger.error(
                    "plan.check.failed",
                    &error,
                    Some(log_fields([("durationMs", duration_ms(started_at).into())])),
                );
            }
            Err(error)
        },
    }
}
