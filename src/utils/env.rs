use std::{
    env::var,
    path::{Path, PathBuf},
};

use log::{error, warn};

fn env_var(id: &str) -> Option<String> {
    var(id)
        .inspect_err(|e| {
            warn!("Could not read env var {}: {}", id, e);
        })
        .ok()
}

pub fn sourcedir() -> PathBuf {
    env_var("SOURCEDIR")
        .map(|d| Path::new(&d).to_path_buf())
        .unwrap_or(Path::new("/data").to_path_buf())
}

pub fn backupdir() -> PathBuf {
    env_var("BACKUPDIR")
        .map(|d| Path::new(&d).to_path_buf())
        .unwrap_or(Path::new("/backup").to_path_buf())
}

pub fn passwdfile() -> PathBuf {
    env_var("PASSWDFILE")
        .map(|d| Path::new(&d).to_path_buf())
        .unwrap_or(Path::new("/etc/passwd").to_path_buf())
}

pub fn minuid() -> u32 {
    env_var("MINUID")
        .and_then(|s| {
            str::parse::<u32>(&s)
                .inspect_err(|e| {
                    error!("Could not parse MINUID to u32: {}", e);
                })
                .ok()
        })
        .unwrap_or(1000)
}
