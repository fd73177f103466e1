use std::{collections::HashSet, path::PathBuf};

use crate::utils::env::{backupdir, minuid, passwdfile, sourcedir};

/// Directory names under the source root that never correspond to a user.
pub const SYSTEM_DIRS: [&str; 9] = [
    "lost+found",
    "tmp",
    "temp",
    "backup",
    "logs",
    "shared",
    "public",
    "cache",
    ".snapshots",
];

/// Run configuration. The defaults match the deployed layout; the paths and
/// the uid threshold can be overridden through the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    pub passwd_file: PathBuf,
    pub min_uid: u32,
    pub denylist: HashSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("/data"),
            target_root: PathBuf::from("/backup"),
            passwd_file: PathBuf::from("/etc/passwd"),
            min_uid: 1000,
            denylist: SYSTEM_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            source_root: sourcedir(),
            target_root: backupdir(),
            passwd_file: passwdfile(),
            min_uid: minuid(),
            ..Self::default()
        }
    }
}
