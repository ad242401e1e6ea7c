//! End-to-end selection over declared pattern entries.

use proptest::prelude::*;
use testplan_domain::{
    CompiledPatternSequence, ConfigMap, ConfigValue, SelectionError, TaggedPattern, TestPlan,
    assign_parallel_groups, select_files,
};

fn exclude(glob: &str) -> ConfigValue {
    let mut map = ConfigMap::new();
    map.insert("exclude", glob.into());
    ConfigValue::Mapping(map)
}

fn compile(entries: &[ConfigValue]) -> Result<CompiledPatternSequence, SelectionError> {
    let patterns = TaggedPattern::parse_list(entries)?;
    Ok(CompiledPatternSequence::compile(&patterns, None)?)
}

const LISTING: [&str; 7] = [
    "foo.rb",
    "vendor/foo.rb",
    "lib/foo.rb",
    "lib/.generated/bar.rb",
    ".rubocop.rb",
    "spec/models/user_spec.rb",
    "README.md",
];

#[test]
fn later_exclude_governs_over_earlier_glob() -> Result<(), SelectionError> {
    let sequence = compile(&["*.rb".into(), exclude("vendor/**")])?;
    assert!(!sequence.evaluate("vendor/foo.rb"));
    assert!(sequence.evaluate("foo.rb"));
    // `*` stays inside one component.
    assert!(!sequence.evaluate("lib/foo.rb"));
    Ok(())
}

#[test]
fn deep_selection_skips_hidden_and_excluded() -> Result<(), SelectionError> {
    let sequence = compile(&["*.rb".into(), "**/*.rb".into(), exclude("vendor/**")])?;
    assert_eq!(
        select_files(&sequence, &LISTING),
        vec!["foo.rb", "lib/foo.rb", "spec/models/user_spec.rb"]
    );
    Ok(())
}

#[test]
fn malformed_entries_are_rejected_before_compilation() {
    let mut bad = ConfigMap::new();
    bad.insert("include", ConfigValue::Bool(true));
    let result = compile(&["a[b]".into(), ConfigValue::Mapping(bad)]);
    // Shape validation runs over the whole list first, so the bad glob is never compiled.
    assert!(matches!(result, Err(SelectionError::Pattern(_))));
}

#[test]
fn plan_combines_selection_and_parallel_groups() -> Result<(), SelectionError> {
    let sequence = compile(&["**/*.rb".into(), "foo.rb".into()])?;
    let tests = select_files(&sequence, &LISTING);

    let mut parallel = ConfigMap::new();
    parallel.insert("mode", "parallel".into());
    parallel.insert("files", "spec/**/*_spec.rb".into());
    let commands = assign_parallel_groups(
        &["make lint".into(), ConfigValue::Mapping(parallel)],
        &LISTING,
    )?;

    let plan = TestPlan::new(tests, commands);
    assert_eq!(plan.commands.len(), 1);
    assert_eq!(plan.expanded_file_count(), 1);
    assert_eq!(
        plan.tests,
        vec![
            "foo.rb",
            "vendor/foo.rb",
            "lib/foo.rb",
            "spec/models/user_spec.rb"
        ]
    );
    Ok(())
}

proptest! {
    #[test]
    fn selection_is_idempotent(paths in proptest::collection::vec("[a-c./]{1,8}", 0..24)) {
        let sequence = compile(&["**/*b*".into(), exclude("a/**"), "*?".into()]);
        prop_assert!(sequence.is_ok());
        if let Ok(sequence) = sequence {
            let first = select_files(&sequence, &paths);
            let second = select_files(&sequence, &paths);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.iter().all(|path| paths.contains(path)));
        }
    }
}
