//! Environment variable parsing.
//!
//! Parsing is strict: a variable that is present must hold a usable value.
//! `TESTPLAN_PROFILE` is the exception, where a blank value means "not set".

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use testplan_shared::{ErrorCode, ErrorEnvelope};

/// Env var: profile name.
pub const ENV_PROFILE: &str = "TESTPLAN_PROFILE";
/// Env var: explicit CI config path.
pub const ENV_CONFIG: &str = "TESTPLAN_CONFIG";
/// Env var: plan output path.
pub const ENV_OUTPUT: &str = "TESTPLAN_OUTPUT";
/// Env var: file lister (`find` | `walk`).
pub const ENV_LISTER: &str = "TESTPLAN_LISTER";
/// Env var: log level (`debug` | `info` | `warn` | `error`).
pub const ENV_LOG_LEVEL: &str = "TESTPLAN_LOG_LEVEL";

const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

/// Which file lister enumerates the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListerKind {
    /// Spawn `find` in the project root.
    #[default]
    Find,
    /// Walk the directory tree in-process.
    Walk,
}

impl ListerKind {
    /// Parse a lister name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "find" => Some(Self::Find),
            "walk" => Some(Self::Walk),
            _ => None,
        }
    }

    /// Stable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Walk => "walk",
        }
    }
}

impl fmt::Display for ListerKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Plan settings read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanEnv {
    /// Profile name override.
    pub profile: Option<Box<str>>,
    /// CI config path override.
    pub config_path: Option<PathBuf>,
    /// Output path override.
    pub output_path: Option<PathBuf>,
    /// Lister override.
    pub lister: Option<ListerKind>,
    /// Log level override, lowercased.
    pub log_level: Option<Box<str>>,
}

impl PlanEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let profile = map
            .get(ENV_PROFILE)
            .map(|raw| raw.trim())
            .filter(|value| !value.is_empty())
            .map(Box::from);

        let lister = parse_optional_trimmed_string(map, ENV_LISTER)?
            .map(|value| {
                ListerKind::parse(&value).ok_or_else(|| EnvParseError::InvalidEnum {
                    var: ENV_LISTER,
                    value: value.into_string(),
                })
            })
            .transpose()?;

        let log_level = parse_optional_trimmed_string(map, ENV_LOG_LEVEL)?
            .map(|value| {
                let lowered = value.to_ascii_lowercase();
                if LOG_LEVELS.contains(&lowered.as_str()) {
                    Ok(lowered.into_boxed_str())
                } else {
                    Err(EnvParseError::InvalidEnum {
                        var: ENV_LOG_LEVEL,
                        value: value.into_string(),
                    })
                }
            })
            .transpose()?;

        Ok(Self {
            profile,
            config_path: parse_optional_trimmed_string(map, ENV_CONFIG)?
                .map(|value| PathBuf::from(value.as_ref())),
            output_path: parse_optional_trimmed_string(map, ENV_OUTPUT)?
                .map(|value| PathBuf::from(value.as_ref())),
            lister,
            log_level,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = [ENV_PROFILE, ENV_CONFIG, ENV_OUTPUT, ENV_LISTER, ENV_LOG_LEVEL]
            .into_iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| (name.to_owned(), value))
            })
            .collect();
        Self::from_map(&map)
    }
}

/// Env parsing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}
