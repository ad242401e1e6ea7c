//! # testplan-app
//!
//! Application use cases for plan generation and profile checks.
//! This crate depends on `ports`, `config`, `domain`, and `shared`.

pub mod check_profile;
pub mod generate_plan;

pub use check_profile::{CheckProfileDeps, CheckProfileInput, CheckProfileOutput, check_profile};
pub use generate_plan::{GeneratePlanDeps, GeneratePlanInput, GeneratePlanOutput, generate_plan};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
