use std::collections::HashMap;

use crate::registry::models::UserAccount;

pub mod models;

use models::Reconciled;

/// Splits directory names by whether they exactly match a registered account
/// name. `valid` keeps the enumeration order of `dirs`.
pub fn reconcile(dirs: &[String], users: &HashMap<String, UserAccount>) -> Reconciled {
    let mut reconciled = Reconciled::default();
    for name in dirs {
        if users.contains_key(name) {
            reconciled.valid.push(name.clone());
        } else {
            reconciled.invalid.push(name.clone());
        }
    }
    reconciled
}
