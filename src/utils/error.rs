use std::{io, path::PathBuf};

use thiserror::Error;

/// The account database could not be read at all.
#[derive(Debug, Error)]
#[error("could not read account database {}: {}", .path.display(), .source)]
pub struct RegistryError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The source root could not be enumerated.
#[derive(Debug, Error)]
#[error("could not read source directory {}: {}", .path.display(), .source)]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Failures that abort the whole run. Everything else is folded into the
/// per-item counters.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("source root {} is missing or not a directory", .0.display())]
    SourceRootMissing(PathBuf),

    #[error("target root {} is missing or not a directory", .0.display())]
    TargetRootMissing(PathBuf),

    #[error("no regular users found in the account database")]
    EmptyRegistry,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("could not read confirmation from stdin: {0}")]
    Prompt(io::Error),
}
