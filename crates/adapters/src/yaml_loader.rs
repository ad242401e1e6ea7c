//! Config loader port backed by YAML files on disk.

use std::path::Path;
use testplan_config::{load_plan_config, read_next_profile};
use testplan_ports::{ConfigLoaderPort, LoadedConfig};
use testplan_shared::Result;

/// Reads `solano.yml`-style configs and the plan variables file.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigLoader;

impl ConfigLoaderPort for YamlConfigLoader {
    fn load(&self, root: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
        let (source, tree) = load_plan_config(root, explicit)?;
        tracing::debug!(source = %source.display(), "loaded CI config");
        Ok(LoadedConfig { source, tree })
    }

    fn next_profile(&self, root: &Path) -> Result<Option<String>> {
        read_next_profile(root)
    }
}
