//! Plan writer that emits pretty JSON.

use std::path::{Path, PathBuf};
use testplan_domain::TestPlan;
use testplan_ports::PlanWriterPort;
use testplan_shared::{ErrorCode, ErrorEnvelope, Result};

/// Default plan file name, relative to the project root.
pub const DEFAULT_PLAN_FILE: &str = "test_list.json";

/// Writes the plan as pretty JSON with a trailing newline.
#[derive(Debug, Clone)]
pub struct JsonPlanWriter {
    path: PathBuf,
}

impl JsonPlanWriter {
    /// Write to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanWriterPort for JsonPlanWriter {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write_plan(&self, plan: &TestPlan) -> Result<()> {
        let rendered = render_plan_json(plan)?;
        std::fs::write(&self.path, rendered).map_err(|error| {
            ErrorEnvelope::from(error).with_metadata("path", self.destination())
        })
    }
}

/// Render a plan as pretty JSON with a trailing newline.
pub fn render_plan_json(plan: &TestPlan) -> Result<String> {
    let mut output = serde_json::to_string_pretty(plan).map_err(|error| {
        ErrorEnvelope::invariant(
            ErrorCode::internal(),
            format!("failed to serialize plan: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}
