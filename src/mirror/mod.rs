use std::{
    collections::HashMap,
    fs::{create_dir_all, metadata, set_permissions, Permissions},
    io,
    os::unix::fs::{chown, MetadataExt, PermissionsExt},
    path::Path,
};

use log::warn;

use crate::{config::Config, registry::models::UserAccount, report::Reporter};

pub mod models;

use models::{DirMetadata, ResultCounters};

/// Permission bits of a mode, without the file-type bits.
const MODE_MASK: u32 = 0o7777;

/// Mode applied when the source directory is gone and only the registry
/// entry remains to describe the user.
const FALLBACK_MODE: u32 = 0o755;

/// Creates one backup directory per validated user, mirroring ownership and
/// mode from the source directory. Pre-existing targets are never touched.
/// Per-item failures are folded into the counters; the batch always runs to
/// completion.
pub fn apply(
    valid_users: &[String],
    users: &HashMap<String, UserAccount>,
    config: &Config,
    reporter: &dyn Reporter,
) -> ResultCounters {
    let mut counters = ResultCounters::default();

    for username in valid_users {
        // The reconciler guarantees membership; a mismatch means the inputs
        // went out of sync and the item cannot be processed.
        let Some(account) = users.get(username) else {
            reporter.error(&format!("No registry entry for user {}", username));
            counters.failed += 1;
            continue;
        };

        let target = config.target_root.join(username);
        let source = config.source_root.join(username);

        if target.exists() {
            reporter.warning(&format!("Directory already exists: {}", target.display()));
            counters.already_existed += 1;
            continue;
        }

        if let Err(e) = create_dir_all(&target) {
            reporter.error(&format!(
                "Error creating directory at path {}: {}",
                target.display(),
                e
            ));
            counters.failed += 1;
            continue;
        }
        reporter.success(&format!("Created directory: {}", target.display()));

        let meta = resolve_metadata(&source, account);
        match apply_metadata(&target, meta) {
            Ok(()) => {
                reporter.info(&format!(
                    "Set ownership {}:{} and mode {:o} on {}",
                    meta.uid,
                    meta.gid,
                    meta.mode,
                    target.display()
                ));
                counters.created += 1;
            }
            Err(e) => {
                reporter.warning(&format!(
                    "Error setting ownership/mode on {}: {}",
                    target.display(),
                    e
                ));
                counters.created_with_warnings += 1;
            }
        }
    }

    counters
}

/// Mirrors the source directory's metadata when it exists, otherwise falls
/// back to the registry entry with the default mode.
fn resolve_metadata(source: &Path, account: &UserAccount) -> DirMetadata {
    match metadata(source) {
        Ok(meta) => DirMetadata {
            uid: meta.uid(),
            gid: meta.gid(),
            mode: meta.mode() & MODE_MASK,
        },
        Err(e) => {
            warn!(
                "Could not read metadata of {}, using registry defaults: {}",
                source.display(),
                e
            );
            DirMetadata {
                uid: account.uid,
                gid: account.gid,
                mode: FALLBACK_MODE,
            }
        }
    }
}

fn apply_metadata(target: &Path, meta: DirMetadata) -> io::Result<()> {
    chown(target, Some(meta.uid), Some(meta.gid))?;
    set_permissions(target, Permissions::from_mode(meta.mode))
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir;
    use std::os::unix::fs::symlink;
    use std::path::PathBuf;

    use tempfile::{tempdir, TempDir};

    use crate::report::test_support::Recording;

    use super::*;

    struct Fixture {
        _root: TempDir,
        config: Config,
    }

    fn fixture() -> Fixture {
        let root = tempdir().unwrap();
        let config = Config {
            source_root: root.path().join("data"),
            target_root: root.path().join("backup"),
            ..Config::default()
        };
        create_dir(&config.source_root).unwrap();
        create_dir(&config.target_root).unwrap();
        Fixture {
            _root: root,
            config,
        }
    }

    fn stat(path: &Path) -> (u32, u32, u32) {
        let meta = metadata(path).unwrap();
        (meta.uid(), meta.gid(), meta.mode() & MODE_MASK)
    }

    /// Registry entry whose uid/gid match the invoking user, so chown always
    /// succeeds regardless of privileges.
    fn own_account(name: &str, probe: &Path) -> UserAccount {
        let meta = metadata(probe).unwrap();
        UserAccount {
            name: name.to_string(),
            uid: meta.uid(),
            gid: meta.gid(),
        }
    }

    fn registry(accounts: Vec<UserAccount>) -> HashMap<String, UserAccount> {
        accounts.into_iter().map(|a| (a.name.clone(), a)).collect()
    }

    fn source_dir(config: &Config, name: &str, mode: u32) -> PathBuf {
        let path = config.source_root.join(name);
        create_dir(&path).unwrap();
        set_permissions(&path, Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn mirrors_source_ownership_and_mode() {
        let fx = fixture();
        let source = source_dir(&fx.config, "alice", 0o750);
        let users = registry(vec![own_account("alice", &fx.config.source_root)]);
        let reporter = Recording::new(true);

        let counters = apply(&["alice".to_string()], &users, &fx.config, &reporter);

        assert_eq!(
            counters,
            ResultCounters {
                created: 1,
                ..ResultCounters::default()
            }
        );
        assert_eq!(
            stat(&fx.config.target_root.join("alice")),
            stat(&source)
        );
    }

    #[test]
    fn falls_back_to_registry_metadata() {
        let fx = fixture();
        let account = own_account("alice", &fx.config.source_root);
        let expected = (account.uid, account.gid, FALLBACK_MODE);
        let users = registry(vec![account]);
        let reporter = Recording::new(true);

        let counters = apply(&["alice".to_string()], &users, &fx.config, &reporter);

        assert_eq!(counters.created, 1);
        assert_eq!(stat(&fx.config.target_root.join("alice")), expected);
    }

    #[test]
    fn never_touches_existing_targets() {
        let fx = fixture();
        source_dir(&fx.config, "alice", 0o750);
        let target = fx.config.target_root.join("alice");
        create_dir(&target).unwrap();
        set_permissions(&target, Permissions::from_mode(0o700)).unwrap();
        let users = registry(vec![own_account("alice", &fx.config.source_root)]);
        let reporter = Recording::new(true);

        let counters = apply(&["alice".to_string()], &users, &fx.config, &reporter);

        assert_eq!(
            counters,
            ResultCounters {
                already_existed: 1,
                ..ResultCounters::default()
            }
        );
        assert_eq!(stat(&target).2, 0o700);
    }

    #[test]
    fn second_run_is_idempotent() {
        let fx = fixture();
        source_dir(&fx.config, "alice", 0o750);
        source_dir(&fx.config, "carol", 0o700);
        let users = registry(vec![
            own_account("alice", &fx.config.source_root),
            own_account("carol", &fx.config.source_root),
        ]);
        let valid = vec!["alice".to_string(), "carol".to_string()];
        let reporter = Recording::new(true);

        let first = apply(&valid, &users, &fx.config, &reporter);
        let second = apply(&valid, &users, &fx.config, &reporter);

        assert_eq!(first.created, 2);
        assert_eq!(second.created, 0);
        assert_eq!(second.already_existed, first.created);
    }

    #[test]
    fn metadata_failure_is_a_distinct_outcome() {
        // chown to root can only be made to fail for an unprivileged caller.
        if unsafe { libc::geteuid() } == 0 {
            return;
        }
        let fx = fixture();
        let users = registry(vec![UserAccount {
            name: "alice".to_string(),
            uid: 0,
            gid: 0,
        }]);
        let reporter = Recording::new(true);

        let counters = apply(&["alice".to_string()], &users, &fx.config, &reporter);

        assert_eq!(
            counters,
            ResultCounters {
                created_with_warnings: 1,
                ..ResultCounters::default()
            }
        );
        assert!(fx.config.target_root.join("alice").is_dir());
        assert!(reporter.contains("Error setting ownership/mode"));
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let fx = fixture();
        let users = registry(vec![
            own_account("alice", &fx.config.source_root),
            own_account("bob", &fx.config.source_root),
            own_account("carol", &fx.config.source_root),
        ]);
        // A dangling symlink defeats create_dir_all without counting as an
        // existing target, whatever uid the tests run under.
        symlink("missing", fx.config.target_root.join("bob")).unwrap();
        let valid = vec![
            "alice".to_string(),
            "bob".to_string(),
            "carol".to_string(),
        ];
        let reporter = Recording::new(true);

        let counters = apply(&valid, &users, &fx.config, &reporter);

        assert_eq!(counters.created, 2);
        assert_eq!(counters.failed, 1);
        assert!(fx.config.target_root.join("alice").is_dir());
        assert!(fx.config.target_root.join("carol").is_dir());
    }
}
