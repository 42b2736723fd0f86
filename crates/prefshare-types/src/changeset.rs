use serde::{Deserialize, Serialize};

use crate::keys;
use crate::scalar::ScalarValue;

/// One mutation within a write session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Upsert the `(key, value.kind())` entry.
    Put(ScalarValue),
    /// Remove every typed entry sharing the key name.
    ///
    /// Removal is untyped: a caller removing `"volume"` does not know (or
    /// care) which kinds the key was stored under.
    Remove,
}

/// An ordered batch of mutations produced by one write session.
///
/// Order matters: when a batch names the same key twice, the later entry
/// wins on apply. Reserved protocol keys may be present (the election
/// engine writes the master flag through a change set) but are stripped
/// before propagation via [`ChangeSet::without_reserved`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    entries: Vec<(String, Mutation)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an upsert.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<ScalarValue>) -> &mut Self {
        self.entries.push((key.into(), Mutation::Put(value.into())));
        self
    }

    /// Append an untyped removal.
    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.entries.push((key.into(), Mutation::Remove));
        self
    }

    /// A single-entry change set. Convenience for protocol writes.
    pub fn single(key: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        let mut set = Self::new();
        set.put(key, value);
        set
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Mutation)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy with all reserved protocol keys removed.
    ///
    /// Outgoing propagation always goes through this filter: the master
    /// flag and the sender marker are protocol-internal, never domain data.
    pub fn without_reserved(&self) -> ChangeSet {
        ChangeSet {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| !keys::is_reserved(key))
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<(String, Mutation)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (String, Mutation)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
