/// Ownership and permission bits resolved for a created backup directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirMetadata {
    pub uid: u32,
    pub gid: u32,
    pub mode: u32,
}

/// Run-level outcome counters. `created_with_warnings` counts directories
/// that exist but could not be chowned/chmodded, so partial success is
/// visible in the summary instead of hiding under `created`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResultCounters {
    pub created: usize,
    pub created_with_warnings: usize,
    pub already_existed: usize,
    pub failed: usize,
}
