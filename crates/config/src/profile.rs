//! Profile resolution and field normalization.

use testplan_domain::{ConfigValue, PatternError, TaggedPattern};
use testplan_shared::{ErrorCode, ErrorEnvelope};

const PROFILES_KEY: &str = "profiles";
const TEST_PATTERN_FIELD: &str = "test_pattern";
const TESTS_FIELD: &str = "tests";

/// Everything the planner needs from one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSettings {
    /// Resolved profile name.
    pub profile: String,
    /// Top-level patterns followed by the profile's own.
    pub test_patterns: Vec<TaggedPattern>,
    /// Top-level `tests` entries followed by the profile's own.
    pub tests: Vec<ConfigValue>,
}

/// Profile selection failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// No profile name was given and none could be resolved.
    #[error("missing profile name")]
    MissingName,
    /// The config has no `profiles` section.
    #[error("no profiles defined")]
    NoProfiles,
    /// The named profile does not exist.
    #[error("no such profile '{profile}'")]
    ProfileMissing {
        /// Requested profile.
        profile: String,
    },
    /// A field had a type other than string, list, or absent.
    #[error("malformed '{field}' in {scope}: expected string or list, found {found}")]
    MalformedFieldType {
        /// Field name.
        field: &'static str,
        /// `profile '<name>'`, `top level`, or `profiles`.
        scope: String,
        /// Type name of the offending value.
        found: &'static str,
    },
    /// A pattern entry had an invalid shape.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl From<ProfileError> for ErrorEnvelope {
    fn from(error: ProfileError) -> Self {
        let message = error.to_string();
        match error {
            ProfileError::MissingName | ProfileError::NoProfiles => {
                Self::expected(ErrorCode::new("config", "profile_missing"), message)
            },
            ProfileError::ProfileMissing { profile } => {
                Self::expected(ErrorCode::new("config", "profile_missing"), message)
                    .with_metadata("profile", profile)
            },
            ProfileError::MalformedFieldType {
                field,
                scope,
                found,
            } => Self::expected(ErrorCode::new("config", "malformed_field_type"), message)
                .with_metadata("field", field)
                .with_metadata("scope", scope)
                .with_metadata("found", found),
            ProfileError::Pattern(error) => error.into(),
        }
    }
}

/// Pick the profile name: explicit first, then `fallback`.
///
/// Names are trimmed; a blank name counts as absent. `fallback` only runs
/// when no explicit name is usable.
pub fn resolve_profile_name<F>(explicit: Option<&str>, fallback: F) -> Result<String, ErrorEnvelope>
where
    F: FnOnce() -> Result<Option<String>, ErrorEnvelope>,
{
    if let Some(name) = non_blank(explicit) {
        return Ok(name.to_owned());
    }
    let resolved = fallback()?;
    non_blank(resolved.as_deref())
        .map(str::to_owned)
        .ok_or_else(|| ProfileError::MissingName.into())
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|name| !name.is_empty())
}

/// Select `profile` from `tree` and merge its fields with the top level.
pub fn select_profile(tree: &ConfigValue, profile: &str) -> Result<PlanSettings, ProfileError> {
    let profiles = match tree.get(PROFILES_KEY) {
        None | Some(ConfigValue::Null) => return Err(ProfileError::NoProfiles),
        Some(ConfigValue::Mapping(profiles)) => profiles,
        Some(other) => {
            return Err(ProfileError::MalformedFieldType {
                field: PROFILES_KEY,
                scope: "top level".to_owned(),
                found: other.type_name(),
            });
        },
    };

    let selected = match profiles.get(profile) {
        None | Some(ConfigValue::Null) => {
            return Err(ProfileError::ProfileMissing {
                profile: profile.to_owned(),
            });
        },
        Some(selected) if selected.as_mapping().is_some() => selected,
        Some(other) => {
            return Err(ProfileError::MalformedFieldType {
                field: PROFILES_KEY,
                scope: format!("profile '{profile}'"),
                found: other.type_name(),
            });
        },
    };

    let scope = format!("profile '{profile}'");
    let mut patterns = normalize_list(tree.get(TEST_PATTERN_FIELD), TEST_PATTERN_FIELD, "top level")?;
    patterns.extend(normalize_list(
        selected.get(TEST_PATTERN_FIELD),
        TEST_PATTERN_FIELD,
        &scope,
    )?);

    let mut tests = normalize_list(tree.get(TESTS_FIELD), TESTS_FIELD, "top level")?;
    tests.extend(normalize_list(selected.get(TESTS_FIELD), TESTS_FIELD, &scope)?);

    Ok(PlanSettings {
        profile: profile.to_owned(),
        test_patterns: TaggedPattern::parse_list(&patterns)?,
        tests,
    })
}

/// Normalize a string / list / absent field to a list.
pub fn normalize_list(
    value: Option<&ConfigValue>,
    field: &'static str,
    scope: &str,
) -> Result<Vec<ConfigValue>, ProfileError> {
    match value {
        None | Some(ConfigValue::Null) => Ok(Vec::new()),
        Some(ConfigValue::String(single)) => Ok(vec![ConfigValue::String(single.clone())]),
        Some(ConfigValue::Sequence(items)) => Ok(items.clone()),
        Some(other) => Err(ProfileError::MalformedFieldType {
            field,
            scope: scope.to_owned(),
            found: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_config_yaml;
    use std::error::Error;

    const CONFIG: &str = r"
test_pattern:
  - 'spec/**/*_spec.rb'
tests:
  - make lint
profiles:
  default:
    test_pattern:
      - exclude: 'spec/slow/**'
    tests:
      - mode: parallel
        files: 'spec/**/*_spec.rb'
  bare:
    test_pattern: 'test/**/*_test.rb'
  empty: {}
  broken:
    tests: 42
  scalar: nope
";

    #[test]
    fn merges_top_level_ahead_of_profile() -> Result<(), Box<dyn Error>> {
        let tree = parse_config_yaml(CONFIG)?;
        let settings = select_profile(&tree, "default")?;
        assert_eq!(
            settings.test_patterns,
            vec![
                TaggedPattern::Literal("spec/**/*_spec.rb".to_owned()),
                TaggedPattern::Exclude("spec/slow/**".to_owned()),
            ]
        );
        assert_eq!(settings.tests.len(), 2);
        assert_eq!(settings.tests[0], ConfigValue::from("make lint"));
        Ok(())
    }

    #[test]
    fn string_and_absent_fields_normalize() -> Result<(), Box<dyn Error>> {
        let tree = parse_config_yaml(CONFIG)?;
        let bare = select_profile(&tree, "bare")?;
        assert_eq!(bare.test_patterns.len(), 2);
        assert_eq!(bare.tests.len(), 1);

        let empty = select_profile(&tree, "empty")?;
        assert_eq!(empty.test_patterns.len(), 1);
        Ok(())
    }

    #[test]
    fn malformed_fields_are_rejected() -> Result<(), Box<dyn Error>> {
        let tree = parse_config_yaml(CONFIG)?;
        assert!(matches!(
            select_profile(&tree, "broken"),
            Err(ProfileError::MalformedFieldType { field: "tests", found: "number", .. })
        ));
        assert!(matches!(
            select_profile(&tree, "scalar"),
            Err(ProfileError::MalformedFieldType { found: "string", .. })
        ));
        Ok(())
    }

    #[test]
    fn missing_profiles_are_reported() -> Result<(), Box<dyn Error>> {
        let tree = parse_config_yaml(CONFIG)?;
        assert_eq!(
            select_profile(&tree, "nightly"),
            Err(ProfileError::ProfileMissing {
                profile: "nightly".to_owned()
            })
        );
        let no_profiles = parse_config_yaml("tests: []\n")?;
        assert_eq!(select_profile(&no_profiles, "default"), Err(ProfileError::NoProfiles));
        Ok(())
    }

    #[test]
    fn invalid_pattern_shapes_fail_at_load() -> Result<(), Box<dyn Error>> {
        let tree = parse_config_yaml("profiles:\n  p:\n    test_pattern:\n      - only: x\n")?;
        assert!(matches!(
            select_profile(&tree, "p"),
            Err(ProfileError::Pattern(PatternError::InvalidShape { index: 0, .. }))
        ));
        Ok(())
    }

    #[test]
    fn explicit_name_wins_and_is_trimmed() -> Result<(), Box<dyn Error>> {
        let name = resolve_profile_name(Some("  nightly "), || {
            Err(ErrorEnvelope::expected(ErrorCode::internal(), "fallback must not run"))
        })?;
        assert_eq!(name, "nightly");
        Ok(())
    }

    #[test]
    fn fallback_used_for_blank_or_missing_name() -> Result<(), Box<dyn Error>> {
        let name = resolve_profile_name(Some("   "), || Ok(Some(" ci ".to_owned())))?;
        assert_eq!(name, "ci");

        let missing = resolve_profile_name(None, || Ok(None));
        assert!(missing.is_err_and(|error| error.is("config", "profile_missing")));
        Ok(())
    }

    #[test]
    fn profile_errors_carry_metadata() {
        let envelope = ErrorEnvelope::from(ProfileError::MalformedFieldType {
            field: "tests",
            scope: "profile 'x'".to_owned(),
            found: "number",
        });
        assert!(envelope.is("config", "malformed_field_type"));
        assert_eq!(envelope.metadata.get("field").map(String::as_str), Some("tests"));
    }
}
