//! File enumeration boundary contract.

use std::path::Path;
use testplan_shared::Result;

/// Boundary contract for listing the files of a project.
///
/// Returned paths are relative to `root`, `/`-separated, with no leading
/// `./` and any listing-tool quoting already resolved.
pub trait FileListerPort: Send + Sync {
    /// Short identifier used in logs (for example `find` or `walk`).
    fn name(&self) -> &'static str;

    /// List every candidate file under `root`.
    fn list_files(&self, root: &Path) -> Result<Vec<String>>;
}

