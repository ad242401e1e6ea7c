//! # testplan-infra
//!
//! Infrastructure wiring and runtime composition.
//! This crate depends on `app`, `adapters`, `config`, and `shared`.

/// Local CLI orchestration helpers.
pub mod cli_local;
/// Environment validation helpers used by CLI surfaces.
pub mod env_check;
/// Glob debugging helper.
pub mod glob_check;
/// File lister selection.
mod lister_factory;

pub use cli_local::{
    LocalPlanOptions, LogOutput, build_logger, resolve_output_path, run_check_local,
    run_generate_local,
};
pub use env_check::{InfraError, InfraResult, load_std_env, validate_env_parsing};
pub use glob_check::{PathMatch, match_paths};
pub use lister_factory::build_file_lister;

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
