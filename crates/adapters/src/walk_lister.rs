//! In-process file lister built on `walkdir`.

use std::path::Path;
use testplan_ports::FileListerPort;
use testplan_shared::{ErrorEnvelope, Result};
use walkdir::{DirEntry, WalkDir};

/// Walks the project tree, skipping anything whose name starts with `.`.
///
/// Produces the same set as the `find` lister, sorted by path.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkFileLister;

impl FileListerPort for WalkFileLister {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn list_files(&self, root: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|error| {
                let path = error
                    .path()
                    .map(|path| path.to_string_lossy().to_string())
                    .unwrap_or_default();
                ErrorEnvelope::from(std::io::Error::from(error)).with_metadata("path", path)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            files.push(
                relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/"),
            );
        }

        files.sort();
        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
