//! Plan emission boundary contract.

use testplan_domain::TestPlan;
use testplan_shared::Result;

/// Boundary contract for persisting a generated plan.
pub trait PlanWriterPort: Send + Sync {
    /// Human-readable destination, for logs and summaries.
    fn destination(&self) -> String;

    /// Persist the plan.
    fn write_plan(&self, plan: &TestPlan) -> Result<()>;
}
