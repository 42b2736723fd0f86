use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use prefshare_types::{ChangeSet, PeerId, ScalarKind, ScalarValue};

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;
use crate::traits::{PeerStore, ScalarStore};

/// In-memory registry of peer stores implementing [`PeerStore`].
///
/// Stands in for the platform's inter-process query mechanism: every
/// registered peer owns one [`MemoryStore`], and addressed reads/writes are
/// routed to it. Addressing a peer that was never registered fails with
/// [`StoreError::PeerUnreachable`], which is how unreachable processes
/// present to the election engine.
pub struct MemoryHub {
    stores: RwLock<HashMap<PeerId, Arc<MemoryStore>>>,
}

impl MemoryHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Register a fresh store for `peer` and return it.
    ///
    /// Re-registering a peer replaces its store.
    pub fn register(&self, peer: PeerId) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        self.stores
            .write()
            .expect("lock poisoned")
            .insert(peer, Arc::clone(&store));
        store
    }

    /// Drop `peer`'s store, simulating an uninstalled application.
    /// Returns `true` if the peer was registered.
    pub fn unregister(&self, peer: &PeerId) -> bool {
        self.stores
            .write()
            .expect("lock poisoned")
            .remove(peer)
            .is_some()
    }

    /// The store registered for `peer`, if any.
    pub fn store_of(&self, peer: &PeerId) -> Option<Arc<MemoryStore>> {
        self.stores.read().expect("lock poisoned").get(peer).cloned()
    }

    fn route(&self, peer: &PeerId) -> StoreResult<Arc<MemoryStore>> {
        self.store_of(peer).ok_or_else(|| {
            debug!(peer = %peer, "addressed peer is not reachable");
            StoreError::PeerUnreachable(peer.clone())
        })
    }
}

impl Default for MemoryHub {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerStore for MemoryHub {
    fn read(&self, peer: &PeerId, key: &str, kind: ScalarKind) -> StoreResult<Option<ScalarValue>> {
        self.route(peer)?.get(key, kind)
    }

    fn write(&self, peer: &PeerId, changes: &ChangeSet) -> StoreResult<()> {
        self.route(peer)?.apply(changes)
    }

    fn clear_all(&self, peer: &PeerId) -> StoreResult<()> {
        self.route(peer)?.clear()
    }
}

impl std::fmt::Debug for MemoryHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.stores.read().expect("lock poisoned").len();
        f.debug_struct("MemoryHub").field("peer_count", &count).finish()
    }
}
