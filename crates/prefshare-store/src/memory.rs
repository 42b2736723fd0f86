use std::collections::HashMap;
use std::sync::RwLock;

use prefshare_types::{ChangeSet, Mutation, ScalarKind, ScalarValue};

use crate::error::{StoreError, StoreResult};
use crate::traits::ScalarStore;

/// In-memory, HashMap-based scalar store.
///
/// Entries live in a map keyed by `(key, kind)` behind a `RwLock`. Data is
/// lost when the store is dropped.
pub struct MemoryStore {
    entries: RwLock<HashMap<(String, ScalarKind), ScalarValue>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of typed entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarStore for MemoryStore {
    fn get(&self, key: &str, kind: ScalarKind) -> StoreResult<Option<ScalarValue>> {
        let map = self
            .entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(map.get(&(key.to_string(), kind)).cloned())
    }

    fn apply(&self, changes: &ChangeSet) -> StoreResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        for (key, mutation) in changes.iter() {
            match mutation {
                Mutation::Put(value) => {
                    map.insert((key.clone(), value.kind()), value.clone());
                }
                // Untyped removal: drop the key under every kind.
                Mutation::Remove => {
                    map.retain(|(name, _), _| name != key);
                }
            }
        }
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?
            .clear();
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
