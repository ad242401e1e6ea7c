//! CI config discovery and YAML loading.
//!
//! YAML values are converted into [`ConfigValue`] trees once, here. Mapping
//! keys of any scalar or complex type become strings, tags are dropped, and
//! merge keys (`<<`) are resolved before conversion.

use serde_yaml_ng::Value as YamlValue;
use std::path::{Path, PathBuf};
use testplan_domain::{ConfigMap, ConfigValue};
use testplan_shared::{ErrorCode, ErrorEnvelope};

/// Config files tried, in order, when no explicit path is given.
pub const CONFIG_CANDIDATES: [&str; 4] = [
    "solano.yml",
    "config/solano.yml",
    "tddium.yml",
    "config/tddium.yml",
];

/// File that may name the next profile to plan.
pub const PLAN_VARIABLES_FILE: &str = "solano-plan-variables.json";

const NEXT_PROFILE_KEY: &str = "next_profile";

/// Resolve the config path for `root`.
///
/// A relative `explicit` path is taken relative to `root`.
pub fn discover_config_path(root: &Path, explicit: Option<&Path>) -> Result<PathBuf, ErrorEnvelope> {
    if let Some(explicit) = explicit {
        let path = root.join(explicit);
        if path.is_file() {
            return Ok(path);
        }
        return Err(configuration_missing(format!(
            "config file not found: {}",
            path.display()
        ))
        .with_metadata("path", path.to_string_lossy().to_string()));
    }

    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| {
            let found = path.is_file();
            tracing::debug!(path = %path.display(), found, "config candidate");
            found
        })
        .ok_or_else(|| {
            configuration_missing("no CI configuration found")
                .with_metadata("root", root.to_string_lossy().to_string())
                .with_metadata("searched", CONFIG_CANDIDATES.join(","))
        })
}

/// Discover, read and parse the CI config for `root`.
pub fn load_plan_config(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<(PathBuf, ConfigValue), ErrorEnvelope> {
    let path = discover_config_path(root, explicit)?;
    let text = read_config_file(&path)?;
    let tree = parse_config_yaml(&text)
        .map_err(|error| error.with_metadata("path", path.to_string_lossy().to_string()))?;
    if tree.is_null() {
        return Err(configuration_missing("CI configuration is empty")
            .with_metadata("path", path.to_string_lossy().to_string()));
    }
    Ok((path, tree))
}

/// Parse YAML text into a string-keyed configuration tree.
pub fn parse_config_yaml(input: &str) -> Result<ConfigValue, ErrorEnvelope> {
    let mut value: YamlValue = serde_yaml_ng::from_str(input).map_err(invalid_yaml)?;
    value.apply_merge().map_err(invalid_yaml)?;
    Ok(yaml_to_config(value))
}

/// Convert a YAML value into a [`ConfigValue`], stringifying mapping keys.
#[must_use]
pub fn yaml_to_config(value: YamlValue) -> ConfigValue {
    match value {
        YamlValue::Null => ConfigValue::Null,
        YamlValue::Bool(value) => ConfigValue::Bool(value),
        YamlValue::Number(number) => yaml_number(&number),
        YamlValue::String(value) => ConfigValue::String(value),
        YamlValue::Sequence(items) => {
            ConfigValue::Sequence(items.into_iter().map(yaml_to_config).collect())
        },
        YamlValue::Mapping(mapping) => ConfigValue::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (stringify_key(key), yaml_to_config(value)))
                .collect::<ConfigMap>(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_config(tagged.value),
    }
}

/// Render a YAML mapping key as a string.
#[must_use]
pub fn stringify_key(key: YamlValue) -> String {
    match key {
        YamlValue::Null => String::new(),
        YamlValue::Bool(value) => value.to_string(),
        YamlValue::Number(number) => number.to_string(),
        YamlValue::String(value) => value,
        YamlValue::Tagged(tagged) => stringify_key(tagged.value),
        complex @ (YamlValue::Sequence(_) | YamlValue::Mapping(_)) => {
            yaml_to_config(complex).to_compact_json()
        },
    }
}

fn yaml_number(number: &serde_yaml_ng::Number) -> ConfigValue {
    if let Some(value) = number.as_i64() {
        return ConfigValue::Number(value.into());
    }
    if let Some(value) = number.as_u64() {
        return ConfigValue::Number(value.into());
    }
    number
        .as_f64()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| ConfigValue::String(number.to_string()), ConfigValue::Number)
}

/// Read `next_profile` from the plan variables file under `root`.
///
/// A missing file, a `null` document, or a missing key all yield `None`.
pub fn read_next_profile(root: &Path) -> Result<Option<String>, ErrorEnvelope> {
    let path = root.join(PLAN_VARIABLES_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let text = read_config_file(&path)?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_plan_variables"),
            format!("invalid plan variables JSON: {error}"),
        )
        .with_metadata("path", path.to_string_lossy().to_string())
    })?;
    Ok(value
        .get(NEXT_PROFILE_KEY)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned))
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::unexpected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn configuration_missing(message: impl Into<String>) -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::new("config", "configuration_missing"), message)
}

fn invalid_yaml(error: serde_yaml_ng::Error) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("config", "invalid_yaml"),
        format!("invalid CI config YAML: {error}"),
    )
}
