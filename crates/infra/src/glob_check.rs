//! Glob debugging helper behind `testplan match`.

use crate::InfraResult;
use testplan_domain::compile_glob;
use testplan_shared::ErrorEnvelope;

/// Outcome of matching one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// The path as given.
    pub path: String,
    /// Whether the glob matched it.
    pub matched: bool,
}

/// Compile `glob` once and test every path against it.
pub fn match_paths<S: AsRef<str>>(glob: &str, paths: &[S]) -> InfraResult<Vec<PathMatch>> {
    let matcher = compile_glob(glob).map_err(ErrorEnvelope::from)?;
    tracing::debug!(glob, regex = matcher.as_regex(), "compiled glob");
    Ok(paths
        .iter()
        .map(|path| PathMatch {
            path: path.as_ref().to_owned(),
            matched: matcher.is_match(path.as_ref()),
        })
        .collect())
}
