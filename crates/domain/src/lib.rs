//! # testplan-domain
//!
//! Pattern matching core for CI test plans.
//!
//! - **Glob** - restricted glob syntax compiled to anchored regular expressions
//! - **Pattern** - tagged include/exclude entries
//! - **Sequence** - last-match-wins evaluation and file selection
//! - **Groups** - parallel group expansion
//! - **Plan** - the emitted plan
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use testplan_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod error;
pub mod glob;
pub mod groups;
pub mod pattern;
pub mod plan;
pub mod sequence;
pub mod value;

pub use error::SelectionError;
pub use glob::{GlobError, GlobMatcher, compile_glob, glob_to_regex};
pub use groups::{PARALLEL_MODE, TestCommand, assign_parallel_groups, is_parallel_entry};
pub use pattern::{PatternError, TaggedPattern};
pub use plan::{TestPlan, dedup_preserving_order};
pub use sequence::{CompiledPattern, CompiledPatternSequence, join_prefix, select_files};
pub use value::{ConfigMap, ConfigValue};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
