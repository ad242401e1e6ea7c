//! Environment validation helpers for CLI surfaces.

use std::collections::BTreeMap;
use testplan_config::PlanEnv;
use testplan_shared::ErrorEnvelope;

/// Infra-level error type (shared error envelope).
pub type InfraError = ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

/// Parse env overrides from `env`, failing on the first unusable value.
pub fn validate_env_parsing(env: &BTreeMap<String, String>) -> InfraResult<PlanEnv> {
    PlanEnv::from_map(env).map_err(ErrorEnvelope::from)
}

/// Parse env overrides from the process environment.
pub fn load_std_env() -> InfraResult<PlanEnv> {
    PlanEnv::from_std_env().map_err(ErrorEnvelope::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use testplan_config::{ENV_LISTER, ListerKind};

    #[test]
    fn valid_env_parses() -> InfraResult<()> {
        let env = BTreeMap::from([(ENV_LISTER.to_owned(), "walk".to_owned())]);
        assert_eq!(validate_env_parsing(&env)?.lister, Some(ListerKind::Walk));
        Ok(())
    }

    #[test]
    fn invalid_lister_is_an_envelope() {
        let env = BTreeMap::from([(ENV_LISTER.to_owned(), "rsync".to_owned())]);
        let error = validate_env_parsing(&env).err();
        assert!(error.is_some_and(|error| error.is("config", "invalid_env_enum")));
    }
}
