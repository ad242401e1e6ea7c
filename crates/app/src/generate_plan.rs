//! Generate a CI test plan for one profile.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use testplan_config::{PlanSettings, resolve_profile_name, select_profile};
use testplan_domain::{
    CompiledPatternSequence, SelectionError, TestPlan, assign_parallel_groups, select_files,
};
use testplan_ports::{
    ConfigLoaderPort, FileListerPort, LogFields, LoggerPort, PlanWriterPort, log_fields,
};
use testplan_shared::{ErrorEnvelope, Result, ResultExt};

/// Input payload for plan generation.
#[derive(Debug, Clone)]
pub struct GeneratePlanInput {
    /// Project root; listed paths are relative to it.
    pub root: PathBuf,
    /// Explicit CI config path (relative paths resolve against `root`).
    pub config_path: Option<PathBuf>,
    /// Explicit profile name; falls back to the plan variables file.
    pub profile: Option<String>,
}

/// Dependencies required by plan generation.
#[derive(Clone)]
pub struct GeneratePlanDeps {
    /// CI config source.
    pub config_loader: Arc<dyn ConfigLoaderPort>,
    /// Project file enumeration.
    pub file_lister: Arc<dyn FileListerPort>,
    /// Plan destination.
    pub plan_writer: Arc<dyn PlanWriterPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratePlanOutput {
    /// Profile the plan was generated for.
    pub profile: String,
    /// Config file that was read.
    pub config_source: PathBuf,
    /// Where the plan was written.
    pub destination: String,
    /// Number of files the lister returned.
    pub files_listed: usize,
    /// The generated plan.
    pub plan: TestPlan,
}

/// Load config, select files and parallel groups, and write the plan.
#[tracing::instrument(name = "generate_plan", skip_all, fields(root = %input.root.display()))]
pub fn generate_plan(
    deps: &GeneratePlanDeps,
    input: GeneratePlanInput,
) -> Result<GeneratePlanOutput> {
    let started_at = Instant::now();
    if let Some(logger) = deps.logger.as_ref() {
        logger.info(
            "plan.generate.start",
            "Plan generation started",
            Some(log_fields_start(&input)),
        );
    }

    let result = run(deps, &input);

    match result {
        Ok(output) => {
            if let Some(logger) = deps.logger.as_ref() {
                logger.info(
                    "plan.generate.completed",
                    "Plan generation completed",
                    Some(log_fields_completed(&output, started_at)),
                );
            }
            Ok(output)
        },
        Err(error) => {
            if let Some(logger) = deps.logger.as_ref() {
                logger.error(
                    "plan.generate.failed",
                    &error,
                    Some(log_fields([("durationMs", duration_ms(started_at).into())])),
                );
            }
            Err(error)
        },
    }
}

fn run(deps: &GeneratePlanDeps, input: &GeneratePlanInput) -> Result<GeneratePlanOutput> {
    let (config_source, settings) = load_settings(
        deps.config_loader.as_ref(),
        &input.root,
        input.config_path.as_deref(),
        input.profile.as_deref(),
    )?;
    let logger = deps
        .logger
        .as_ref()
        .map(|logger| logger.child(log_fields([("profile", settings.profile.as_str().into())])));

    let sequence = CompiledPatternSequence::compile(&settings.test_patterns, None)
        .map_err(SelectionError::from)?;

    let files = deps.file_lister.list_files(&input.root)?;
    if let Some(logger) = logger.as_ref() {
        logger.info(
            "plan.files.listed",
            "Listed project files",
            Some(log_fields([
                ("lister", deps.file_lister.name().into()),
                ("count", files.len().into()),
            ])),
        );
    }

    let tests = select_files(&sequence, &files);
    if let Some(logger) = logger.as_ref() {
        logger.info(
            "plan.tests.selected",
            "Selected test files",
            Some(log_fields([
                ("patterns", sequence.len().into()),
                ("count", tests.len().into()),
            ])),
        );
    }

    let commands = assign_parallel_groups(&settings.tests, &files)?;
    let plan = TestPlan::new(tests, commands);
    if let Some(logger) = logger.as_ref() {
        logger.info(
            "plan.commands.assigned",
            "Assigned parallel groups",
            Some(log_fields([
                ("entries", settings.tests.len().into()),
                ("commands", plan.commands.len().into()),
                ("files", plan.expanded_file_count().into()),
            ])),
        );
    }

    deps.plan_writer.write_plan(&plan)?;

    Ok(GeneratePlanOutput {
        profile: settings.profile,
        config_source,
        destination: deps.plan_writer.destination(),
        files_listed: files.len(),
        plan,
    })
}

/// Resolve the profile name, then load the CI config and select the profile.
///
/// Profile selection errors carry the config source under `config`.
pub(crate) fn load_settings(
    config_loader: &dyn ConfigLoaderPort,
    root: &Path,
    config_path: Option<&Path>,
    profile: Option<&str>,
) -> Result<(PathBuf, PlanSettings)> {
    let profile = resolve_profile_name(profile, || config_loader.next_profile(root))?;
    let loaded = config_loader.load(root, config_path)?;
    let settings = select_profile(&loaded.tree, &profile)
        .map_err(ErrorEnvelope::from)
        .with_metadata("config", loaded.source.display().to_string())?;
    Ok((loaded.source, settings))
}

pub(crate) fn duration_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn log_fields_start(input: &GeneratePlanInput) -> LogFields {
    let mut fields = log_fields([(
        "root",
        Value::String(input.root.to_string_lossy().to_string()),
    )]);
    if let Some(profile) = input.profile.as_deref() {
        fields.insert("requestedProfile".into(), Value::from(profile));
    }
    fields
}

fn log_fields_completed(output: &GeneratePlanOutput, started_at: Instant) -> LogFields {
    log_fields([
        ("profile", Value::from(output.profile.as_str())),
        ("destination", Value::from(output.destination.as_str())),
        ("tests", output.plan.tests.len().into()),
        ("commands", output.plan.commands.len().into()),
        ("durationMs", duration_ms(started_at).into()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use testplan_config::parse_config_yaml;
    use testplan_ports::LoadedConfig;
    use testplan_shared::ErrorCode;

    struct StaticConfig {
        yaml: &'static str,
        next_profile: Option<&'static str>,
    }

    impl ConfigLoaderPort for StaticConfig {
        fn load(&self, root: &Path, _explicit: Option<&Path>) -> Result<LoadedConfig> {
            Ok(LoadedConfig {
                source: root.join("solano.yml"),
                tree: parse_config_yaml(self.yaml)?,
            })
        }

        fn next_profile(&self, _root: &Path) -> Result<Option<String>> {
            Ok(self.next_profile.map(str::to_owned))
        }
    }

    struct StaticFiles(Vec<&'static str>);

    impl FileListerPort for StaticFiles {
        fn name(&self) -> &'static str {
            "static"
        }

        fn list_files(&self, _root: &Path) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|path| (*path).to_owned()).collect())
        }
    }

    #[derive(Default)]
    struct CapturingWriter {
        plans: Mutex<Vec<TestPlan>>,
    }

    impl PlanWriterPort for CapturingWriter {
        fn destination(&self) -> String {
            "memory".to_owned()
        }

        fn write_plan(&self, plan: &TestPlan) -> Result<()> {
            if let Ok(mut plans) = self.plans.lock() {
                plans.push(plan.clone());
            }
            Ok(())
        }
    }

    const YAML: &str = "
test_pattern: 'spec/**/*_spec.rb'
profiles:
  unit:
    test_pattern:
      - exclude: 'spec/features/**'
    tests:
      - make lint
      - mode: parallel
        files: 'spec/features/**/*_spec.rb'
";

    fn deps(yaml: &'static str, writer: Arc<CapturingWriter>) -> GeneratePlanDeps {
        GeneratePlanDeps {
            config_loader: Arc::new(StaticConfig {
                yaml,
                next_profile: Some("unit"),
            }),
            file_lister: Arc::new(StaticFiles(vec![
                "spec/models/user_spec.rb",
                "spec/features/login/sign_in_spec.rb",
                "lib/user.rb",
            ])),
            plan_writer: writer,
            logger: None,
        }
    }

    fn input(profile: Option<&str>) -> GeneratePlanInput {
        GeneratePlanInput {
            root: PathBuf::from("/repo"),
            config_path: None,
            profile: profile.map(str::to_owned),
        }
    }

    #[test]
    fn generates_and_writes_plan() -> Result<()> {
        let writer = Arc::new(CapturingWriter::default());
        let output = generate_plan(&deps(YAML, writer.clone()), input(None))?;

        assert_eq!(output.profile, "unit");
        assert_eq!(output.files_listed, 3);
        assert_eq!(output.plan.tests, vec!["spec/models/user_spec.rb"]);
        assert_eq!(output.plan.commands.len(), 1);
        assert_eq!(
            output.plan.commands[0].files_expanded,
            Some(vec!["spec/features/login/sign_in_spec.rb".to_owned()])
        );
        let written = writer.plans.lock().map(|plans| plans.len()).unwrap_or_default();
        assert_eq!(written, 1);
        Ok(())
    }

    #[test]
    fn bad_glob_fails_before_writing() {
        let writer = Arc::new(CapturingWriter::default());
        let yaml = "test_pattern: 'spec/[ab]'\nprofiles:\n  unit: {}\n";
        let error = generate_plan(&deps(yaml, writer.clone()), input(Some("unit"))).err();

        assert!(error.is_some_and(|error| error.is("glob", "unsupported_char_class")));
        let written = writer.plans.lock().map(|plans| plans.len()).unwrap_or_default();
        assert_eq!(written, 0);
    }

    #[test]
    fn unknown_profile_is_reported() {
        let writer = Arc::new(CapturingWriter::default());
        let error = generate_plan(&deps(YAML, writer), input(Some("nightly"))).err();
        assert!(error.is_some_and(|error| {
            error.is("config", "profile_missing")
                && error.metadata.get("config").map(String::as_str) == Some("/repo/solano.yml")
        }));
    }

    struct MissingConfig;

    impl ConfigLoaderPort for MissingConfig {
        fn load(&self, _root: &Path, _explicit: Option<&Path>) -> Result<LoadedConfig> {
            Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "configuration_missing"),
                "no CI config found",
            ))
        }

        fn next_profile(&self, _root: &Path) -> Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn profile_name_is_resolved_before_config_lookup() {
        let mut deps = deps(YAML, Arc::new(CapturingWriter::default()));
        deps.config_loader = Arc::new(MissingConfig);

        let error = generate_plan(&deps, input(None)).err();
        assert!(error.is_some_and(|error| error.is("config", "profile_missing")));

        let error = generate_plan(&deps, input(Some("unit"))).err();
        assert!(error.is_some_and(|error| error.is("config", "configuration_missing")));
    }
}
