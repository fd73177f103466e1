/// Partition of the enumerated directory names into those that belong to a
/// registered user and those that do not.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}
