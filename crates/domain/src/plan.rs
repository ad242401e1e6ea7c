//! The generated test plan.

use crate::groups::TestCommand;
use serde::Serialize;
use std::collections::HashSet;

/// Selected test files and expanded parallel commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TestPlan {
    /// Matched top-level paths, deduplicated, first occurrence kept.
    pub tests: Vec<String>,
    /// Parallel entries with their expanded file lists.
    pub commands: Vec<TestCommand>,
}

impl TestPlan {
    /// Build a plan, dropping duplicate tests and non-parallel commands.
    #[must_use]
    pub fn new(tests: Vec<String>, commands: Vec<TestCommand>) -> Self {
        Self {
            tests: dedup_preserving_order(tests),
            commands: commands.into_iter().filter(TestCommand::is_parallel).collect(),
        }
    }

    /// Total number of files across all expanded commands.
    #[must_use]
    pub fn expanded_file_count(&self) -> usize {
        self.commands
            .iter()
            .filter_map(|command| command.files_expanded.as_ref())
            .map(Vec::len)
            .sum()
    }
}

/// Remove repeated entries, keeping the first occurrence of each.
#[must_use]
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ConfigValue;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let items = ["b", "a", "b", "c", "a"].map(str::to_owned).to_vec();
        assert_eq!(dedup_preserving_order(items), vec!["b", "a", "c"]);
    }

    #[test]
    fn plan_keeps_only_expanded_commands() {
        let commands = vec![
            TestCommand {
                entry: "make lint".into(),
                files_expanded: None,
            },
            TestCommand {
                entry: ConfigValue::Null,
                files_expanded: Some(vec!["a".to_owned(), "b".to_owned()]),
            },
        ];
        let plan = TestPlan::new(vec!["x".to_owned(), "x".to_owned()], commands);
        assert_eq!(plan.tests, vec!["x"]);
        assert_eq!(plan.commands.len(), 1);
        assert_eq!(plan.expanded_file_count(), 2);
    }

    #[test]
    fn empty_plan_serializes_both_keys() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&TestPlan::default())?;
        assert_eq!(json, r#"{"tests":[],"commands":[]}"#);
        Ok(())
    }
}
