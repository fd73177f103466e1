use std::{collections::HashSet, fs::read_dir, path::Path};

use crate::{report::Reporter, utils::error::ScanError};

/// Lists the immediate subdirectories of the source root that may correspond
/// to user accounts. Denylisted names are reported individually and dropped;
/// entries that are not directories are ignored.
pub fn list_candidate_dirs(
    source_root: &Path,
    denylist: &HashSet<String>,
    reporter: &dyn Reporter,
) -> Result<Vec<String>, ScanError> {
    let entries = read_dir(source_root).map_err(|e| ScanError {
        path: source_root.to_path_buf(),
        source: e,
    })?;

    let mut directories = vec![];
    for entry in entries.flatten() {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if denylist.contains(&name) {
            reporter.warning(&format!("Skipping system directory: {}", name));
        } else {
            directories.push(name);
        }
    }

    Ok(directories)
}
