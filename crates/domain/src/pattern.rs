//! Include/exclude pattern entries.
//!
//! A pattern entry is either a bare glob string or a single-key mapping
//! `{include: glob}` / `{exclude: glob}`. Shapes are validated once, when the
//! configuration is read, so compilation only ever sees [`TaggedPattern`]s.

use crate::value::ConfigValue;

const INCLUDE_KEY: &str = "include";
const EXCLUDE_KEY: &str = "exclude";

/// One declared pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedPattern {
    /// Untagged bare glob.
    Literal(String),
    /// `{include: glob}`.
    Include(String),
    /// `{exclude: glob}`.
    Exclude(String),
}

impl TaggedPattern {
    /// Parse one entry; `None` when the shape is invalid.
    #[must_use]
    pub fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(glob) => Some(Self::Literal(glob.clone())),
            ConfigValue::Mapping(map) if map.len() == 1 => {
                let (key, value) = map.iter().next()?;
                let glob = value.as_str()?.to_owned();
                match key {
                    INCLUDE_KEY => Some(Self::Include(glob)),
                    EXCLUDE_KEY => Some(Self::Exclude(glob)),
                    _ => None,
                }
            },
            _ => None,
        }
    }

    /// Parse every entry of a declared list, reporting the first bad one.
    pub fn parse_list(values: &[ConfigValue]) -> Result<Vec<Self>, PatternError> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Self::from_value(value).ok_or_else(|| PatternError::InvalidShape {
                    index,
                    entry: value.to_compact_json(),
                })
            })
            .collect()
    }

    /// The glob text.
    #[must_use]
    pub fn glob(&self) -> &str {
        match self {
            Self::Literal(glob) | Self::Include(glob) | Self::Exclude(glob) => glob,
        }
    }

    /// Whether a match on this pattern includes the path.
    ///
    /// Untagged globs include, same as `{include: glob}`.
    #[must_use]
    pub const fn governs(&self) -> bool {
        match self {
            Self::Literal(_) | Self::Include(_) => true,
            Self::Exclude(_) => false,
        }
    }
}

/// Pattern-shape validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// A `test_pattern` entry is neither a string nor a single-key include/exclude mapping.
    #[error("test_pattern entry {index} is not a glob or an include/exclude mapping: {entry}")]
    InvalidShape {
        /// Position in the merged pattern list.
        index: usize,
        /// Compact JSON rendering of the entry.
        entry: String,
    },
    /// A parallel test configuration has an invalid `files` field.
    #[error("parallel test config {index} has invalid 'files': {entry}")]
    InvalidParallelFiles {
        /// Position in the merged `tests` list.
        index: usize,
        /// Compact JSON rendering of the whole test configuration.
        entry: String,
    },
    /// A parallel test configuration has a non-string `prefix`.
    #[error("parallel test config {index} has non-string 'prefix': {entry}")]
    InvalidPrefix {
        /// Position in the merged `tests` list.
        index: usize,
        /// Compact JSON rendering of the whole test configuration.
        entry: String,
    },
}

impl PatternError {
    /// Stable error code identifier.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidShape { .. } => "invalid_pattern_shape",
            Self::InvalidParallelFiles { .. } => "invalid_parallel_files",
            Self::InvalidPrefix { .. } => "invalid_prefix",
        }
    }
}
