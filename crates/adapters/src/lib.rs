//! # testplan-adapters
//!
//! Adapter implementations for ports (file listing, config loading, plan
//! writing, logging). This crate depends on `ports`, `config`, and `shared`.

pub mod find_lister;
pub mod log_sink;
pub mod logger;
pub mod plan_writer;
pub mod tracing_logger;
pub mod walk_lister;
pub mod yaml_loader;

pub use find_lister::{FindFileLister, split_quoted};
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::JsonLogger;
pub use plan_writer::{DEFAULT_PLAN_FILE, JsonPlanWriter, render_plan_json};
pub use tracing_logger::TracingLogger;
pub use walk_lister::WalkFileLister;
pub use yaml_loader::YamlConfigLoader;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
