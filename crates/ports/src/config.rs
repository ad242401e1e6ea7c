//! Configuration loading boundary contract.

use std::path::{Path, PathBuf};
use testplan_domain::ConfigValue;
use testplan_shared::Result;

/// A configuration tree and the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// File the tree was read from.
    pub source: PathBuf,
    /// Normalized, string-keyed configuration tree.
    pub tree: ConfigValue,
}

/// Boundary contract for reading CI configuration.
pub trait ConfigLoaderPort: Send + Sync {
    /// Locate and parse the configuration for `root`.
    ///
    /// `explicit` overrides discovery. Implementations fail with
    /// `config:configuration_missing` when nothing is found.
    fn load(&self, root: &Path, explicit: Option<&Path>) -> Result<LoadedConfig>;

    /// Profile named by the plan variables file under `root`, if any.
    fn next_profile(&self, root: &Path) -> Result<Option<String>>;
}
