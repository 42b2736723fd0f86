use prefshare_types::{ChangeSet, PeerId, ScalarKind, ScalarValue};

use crate::error::StoreResult;

/// One peer's own typed key/value data.
///
/// All implementations must satisfy these invariants:
/// - Entries are addressed by `(key, kind)`: the same textual key under two
///   kinds is two independent entries. Reads never coerce across kinds.
/// - Applying a [`ChangeSet`] is last-write-wins in batch order.
/// - An untyped removal deletes every kind stored under the key name.
pub trait ScalarStore: Send + Sync {
    /// Read the value at `(key, kind)`.
    ///
    /// Returns `Ok(None)` if no entry exists at that address, including
    /// when the key exists under a different kind.
    fn get(&self, key: &str, kind: ScalarKind) -> StoreResult<Option<ScalarValue>>;

    /// Apply a batch of mutations in order.
    fn apply(&self, changes: &ChangeSet) -> StoreResult<()>;

    /// Remove every entry.
    fn clear(&self) -> StoreResult<()>;

    /// Whether an entry exists at `(key, kind)`.
    ///
    /// Default implementation reads the address. Backends may override
    /// with a cheaper existence probe.
    fn contains(&self, key: &str, kind: ScalarKind) -> StoreResult<bool> {
        Ok(self.get(key, kind)?.is_some())
    }
}

/// Addressed access to remote peers' stores.
///
/// This is the collaborator seam between the replication protocol and the
/// host platform's inter-process query mechanism. Calls are synchronous and
/// blocking; cancellation and timeouts belong to the transport behind an
/// implementation, not to this interface.
///
/// Implementations only ever mutate a remote peer's store through this
/// interface — never by reaching into shared memory.
pub trait PeerStore: Send + Sync {
    /// Read the single typed value at `(key, kind)` in `peer`'s store.
    ///
    /// Returns `Ok(None)` when the entry is absent and `Err` when the peer
    /// cannot be reached.
    fn read(&self, peer: &PeerId, key: &str, kind: ScalarKind) -> StoreResult<Option<ScalarValue>>;

    /// Upsert a batch of typed entries into `peer`'s store.
    fn write(&self, peer: &PeerId, changes: &ChangeSet) -> StoreResult<()>;

    /// Remove every entry from `peer`'s store.
    fn clear_all(&self, peer: &PeerId) -> StoreResult<()>;
}
