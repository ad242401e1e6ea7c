//! Compiled include/exclude sequences and file selection.

use crate::glob::{GlobError, GlobMatcher, compile_glob};
use crate::pattern::TaggedPattern;

/// One compiled entry: the verdict it returns and the matcher that triggers it.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    governs: bool,
    matcher: GlobMatcher,
}

impl CompiledPattern {
    /// Verdict returned when this entry is the first to match.
    #[must_use]
    pub const fn governs(&self) -> bool {
        self.governs
    }

    /// The compiled glob.
    #[must_use]
    pub const fn matcher(&self) -> &GlobMatcher {
        &self.matcher
    }
}

/// Patterns compiled once and stored last-declared first.
///
/// Evaluation stops at the first matching entry, so the pattern declared
/// latest in configuration decides. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct CompiledPatternSequence {
    entries: Vec<CompiledPattern>,
}

impl CompiledPatternSequence {
    /// Compile `patterns`, joining each glob under `prefix` when given.
    pub fn compile(patterns: &[TaggedPattern], prefix: Option<&str>) -> Result<Self, GlobError> {
        let mut entries = patterns
            .iter()
            .map(|pattern| {
                let glob = prefix.map_or_else(
                    || pattern.glob().to_owned(),
                    |prefix| join_prefix(prefix, pattern.glob()),
                );
                Ok(CompiledPattern {
                    governs: pattern.governs(),
                    matcher: compile_glob(&glob)?,
                })
            })
            .collect::<Result<Vec<_>, GlobError>>()?;
        entries.reverse();
        Ok(Self { entries })
    }

    /// Returns true when the latest-declared matching pattern includes `path`.
    #[must_use]
    pub fn evaluate(&self, path: &str) -> bool {
        self.entries
            .iter()
            .find(|entry| entry.matcher.is_match(path))
            .is_some_and(|entry| entry.governs)
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no patterns were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in evaluation order (last declared first).
    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.entries.iter()
    }
}

/// Join `glob` under `prefix` with exactly one `/` at the boundary.
///
/// An empty `prefix` means no prefix: the glob stays relative to the root
/// instead of becoming an absolute `/glob` that no listed path can match.
#[must_use]
pub fn join_prefix(prefix: &str, glob: &str) -> String {
    let tail = glob.trim_start_matches('/');
    if prefix.is_empty() {
        return tail.to_owned();
    }
    format!("{}/{tail}", prefix.trim_end_matches('/'))
}

/// Paths the sequence includes, in input order.
#[must_use]
pub fn select_files<S: AsRef<str>>(sequence: &CompiledPatternSequence, paths: &[S]) -> Vec<String> {
    paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| sequence.evaluate(path))
        .map(str::to_owned)
        .collect()
}
