//! # testplan-config
//!
//! CI configuration loading, profile selection and environment parsing.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing.
pub mod env;
/// CI config discovery and YAML loading.
pub mod load;
/// Profile resolution and field normalization.
pub mod profile;

pub use env::{
    ENV_CONFIG, ENV_LISTER, ENV_LOG_LEVEL, ENV_OUTPUT, ENV_PROFILE, EnvParseError, ListerKind,
    PlanEnv,
};
pub use load::{
    CONFIG_CANDIDATES, PLAN_VARIABLES_FILE, discover_config_path, load_plan_config,
    parse_config_yaml, read_next_profile, stringify_key, yaml_to_config,
};
pub use profile::{PlanSettings, ProfileError, normalize_list, resolve_profile_name, select_profile};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use testplan_domain::domain_crate_version;
    use testplan_shared::shared_crate_version;

    #[test]
    fn config_can_use_domain_and_shared() {
        assert!(!config_crate_version().is_empty());
        assert_eq!(domain_crate_version(), shared_crate_version());
    }
}
