//! File lister selection.

use std::sync::Arc;
use testplan_adapters::{FindFileLister, WalkFileLister};
use testplan_config::ListerKind;
use testplan_ports::FileListerPort;

/// Build the file lister for `kind`.
#[must_use]
pub fn build_file_lister(kind: ListerKind) -> Arc<dyn FileListerPort> {
    match kind {
        ListerKind::Find => Arc::new(FindFileLister::new()),
        ListerKind::Walk => Arc::new(WalkFileLister),
    }
}
