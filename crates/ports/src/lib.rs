//! # testplan-ports
//!
//! Port traits for the testplan hexagonal architecture.
//!
//! This crate defines the interfaces between the plan use cases and the
//! outside world: file enumeration, configuration loading, plan emission
//! and structured logging. It depends only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod config;
pub mod files;
pub mod logger;
pub mod writer;

pub use config::*;
pub use files::*;
pub use logger::*;
pub use writer::*;

// Re-export domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `testplan-domain`.
pub use testplan_domain::{ConfigMap, ConfigValue, TestPlan};
