//! Selection errors and their envelope mapping.

use crate::glob::GlobError;
use crate::pattern::PatternError;
use testplan_shared::{ErrorCode, ErrorEnvelope};

/// Any failure while compiling or applying declared patterns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// A glob failed to compile.
    #[error(transparent)]
    Glob(#[from] GlobError),
    /// A pattern entry had an invalid shape.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl From<GlobError> for ErrorEnvelope {
    fn from(error: GlobError) -> Self {
        let glob = error.glob().to_owned();
        Self::expected(ErrorCode::new("glob", error.code()), error.to_string())
            .with_metadata("glob", glob)
    }
}

impl From<PatternError> for ErrorEnvelope {
    fn from(error: PatternError) -> Self {
        let code = ErrorCode::new("pattern", error.code());
        let message = error.to_string();
        let (index, entry) = match error {
            PatternError::InvalidShape { index, entry }
            | PatternError::InvalidParallelFiles { index, entry }
            | PatternError::InvalidPrefix { index, entry } => (index, entry),
        };
        Self::expected(code, message)
            .with_metadata("entry_index", index.to_string())
            .with_metadata("entry", entry)
    }
}

impl From<SelectionError> for ErrorEnvelope {
    fn from(error: SelectionError) -> Self {
        match error {
            SelectionError::Glob(error) => error.into(),
            SelectionError::Pattern(error) => error.into(),
        }
    }
}
