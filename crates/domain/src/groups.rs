//! Parallel group assignment.
//!
//! A `tests` entry tagged `mode: parallel` carries its own `files` pattern
//! sequence (optionally scoped under `prefix`). Each such entry gets the
//! subset of the listing its sequence selects.

use crate::error::SelectionError;
use crate::pattern::{PatternError, TaggedPattern};
use crate::sequence::{CompiledPatternSequence, select_files};
use crate::value::ConfigValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// `mode` value that marks an entry for parallel expansion.
pub const PARALLEL_MODE: &str = "parallel";

const FILES_EXPANDED_KEY: &str = "files_expanded";

/// One `tests` entry plus its expanded file list, when it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCommand {
    /// The entry as declared.
    pub entry: ConfigValue,
    /// Files selected for a parallel entry; `None` for other entries.
    pub files_expanded: Option<Vec<String>>,
}

impl TestCommand {
    /// Returns true when the entry was expanded for parallel execution.
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.files_expanded.is_some()
    }
}

impl Serialize for TestCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (Some(files), Some(map)) = (&self.files_expanded, self.entry.as_mapping()) else {
            return self.entry.serialize(serializer);
        };
        let mut expanded = map.clone();
        expanded.insert(
            FILES_EXPANDED_KEY,
            ConfigValue::Sequence(files.iter().map(|path| path.as_str().into()).collect()),
        );
        let mut state = serializer.serialize_map(Some(expanded.len()))?;
        for (key, value) in expanded.iter() {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

/// Returns true when `entry` is a mapping with `mode: parallel`.
#[must_use]
pub fn is_parallel_entry(entry: &ConfigValue) -> bool {
    entry.get("mode").and_then(ConfigValue::as_str) == Some(PARALLEL_MODE)
}

/// Expand every parallel entry of `entries` against `paths`.
///
/// Non-parallel entries are returned unchanged with no expansion.
pub fn assign_parallel_groups<S: AsRef<str>>(
    entries: &[ConfigValue],
    paths: &[S],
) -> Result<Vec<TestCommand>, SelectionError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<TestCommand, SelectionError> {
            if !is_parallel_entry(entry) {
                return Ok(TestCommand {
                    entry: entry.clone(),
                    files_expanded: None,
                });
            }
            let patterns = parallel_patterns(index, entry)?;
            let prefix = parallel_prefix(index, entry)?;
            let sequence = CompiledPatternSequence::compile(&patterns, prefix)?;
            Ok(TestCommand {
                entry: entry.clone(),
                files_expanded: Some(select_files(&sequence, paths)),
            })
        })
        .collect()
}

fn parallel_patterns(index: usize, entry: &ConfigValue) -> Result<Vec<TaggedPattern>, PatternError> {
    let invalid = || PatternError::InvalidParallelFiles {
        index,
        entry: entry.to_compact_json(),
    };
    let files = entry.get("files").unwrap_or(&ConfigValue::Null);
    if let Some(single) = TaggedPattern::from_value(files) {
        return Ok(vec![single]);
    }
    match files.as_sequence() {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|item| TaggedPattern::from_value(item).ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

fn parallel_prefix(index: usize, entry: &ConfigValue) -> Result<Option<&str>, PatternError> {
    match entry.get("prefix") {
        None | Some(ConfigValue::Null) => Ok(None),
        Some(ConfigValue::String(prefix)) => Ok(Some(prefix)),
        Some(_) => Err(PatternError::InvalidPrefix {
            index,
            entry: entry.to_compact_json(),
        }),
    }
}
