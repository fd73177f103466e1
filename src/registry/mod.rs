use std::{collections::HashMap, fs::read_to_string, path::Path};

use log::debug;

use crate::utils::error::RegistryError;

pub mod models;

use models::UserAccount;

/// Reads the passwd-format account database and keeps every account with
/// `uid >= min_uid`, keyed by account name. Malformed entries are skipped;
/// only a database that cannot be read at all is an error.
pub fn list_regular_users(
    passwd_file: &Path,
    min_uid: u32,
) -> Result<HashMap<String, UserAccount>, RegistryError> {
    let contents = read_to_string(passwd_file).map_err(|e| RegistryError {
        path: passwd_file.to_path_buf(),
        source: e,
    })?;

    let mut users = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(account) = parse_account(line) else {
            debug!("Skipping malformed account entry: {}", line);
            continue;
        };
        if account.uid >= min_uid {
            users.insert(account.name.clone(), account);
        }
    }

    Ok(users)
}

/// Entry layout: `name:password:uid:gid:gecos:home:shell`.
fn parse_account(line: &str) -> Option<UserAccount> {
    let mut fields = line.split(':');
    let name = fields.next()?;
    let _password = fields.next()?;
    let uid = fields.next()?.parse().ok()?;
    let gid = fields.next()?.parse().ok()?;

    if name.is_empty() {
        return None;
    }
    Some(UserAccount {
        name: name.to_string(),
        uid,
        gid,
    })
}
