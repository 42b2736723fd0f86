use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use prefshare_directory::PeerDirectory;
use prefshare_election::ElectionEngine;
use prefshare_store::PeerStore;
use prefshare_sync::{PeerChannel, Propagator};
use prefshare_types::{ChangeSet, PeerId, ScalarKind, ScalarValue};

use crate::error::{PrefsError, PrefsResult};

/// The shared preference store, routed to the current master peer.
///
/// Reads address the master resolved at construction (or at the last
/// [`SharedPrefs::refresh_master`]); write sessions re-resolve before every
/// commit. An unreachable master makes reads fall back to the caller's
/// default, matching the behavior of an absent entry.
pub struct SharedPrefs {
    directory: PeerDirectory,
    election: ElectionEngine,
    store: Arc<dyn PeerStore>,
    propagator: Propagator,
    master: RwLock<PeerId>,
}

impl SharedPrefs {
    /// Build the facade and resolve the master once.
    ///
    /// Fails when discovery yields no eligible peers — a device with a
    /// single participating application still discovers itself.
    pub fn new(
        directory: PeerDirectory,
        store: Arc<dyn PeerStore>,
        channel: Arc<dyn PeerChannel>,
    ) -> PrefsResult<Self> {
        let election = ElectionEngine::new(Arc::clone(&store));
        let master = Self::resolve(&directory, &election)?;
        info!(master = %master, "shared preferences ready");
        Ok(Self {
            directory,
            election,
            store,
            propagator: Propagator::new(channel),
            master: RwLock::new(master),
        })
    }

    fn resolve(directory: &PeerDirectory, election: &ElectionEngine) -> PrefsResult<PeerId> {
        let peers = directory.discover_peers();
        Ok(election.resolve_master(&peers)?)
    }

    /// Re-run discovery and election, updating the cached master handle.
    pub fn refresh_master(&self) -> PrefsResult<PeerId> {
        let master = Self::resolve(&self.directory, &self.election)?;
        *self.master.write().expect("lock poisoned") = master.clone();
        debug!(master = %master, "master refreshed");
        Ok(master)
    }

    /// Run discovery and election once, without consulting any cache.
    ///
    /// Intended for process startup (the original runs this from a
    /// boot hook) so the device converges on a master before the first
    /// read or write.
    pub fn bootstrap(&self) -> PrefsResult<PeerId> {
        let master = self.refresh_master()?;
        info!(master = %master, "bootstrap election complete");
        Ok(master)
    }

    /// The currently cached master identifier.
    pub fn master(&self) -> PeerId {
        self.master.read().expect("lock poisoned").clone()
    }

    fn read(&self, key: &str, kind: ScalarKind) -> Option<ScalarValue> {
        let master = self.master();
        match self.store.read(&master, key, kind) {
            Ok(value) => value,
            Err(err) => {
                // Unreachable master reads as absent; the caller's default
                // applies.
                debug!(master = %master, key, %err, "read failed, using default");
                None
            }
        }
    }

    // ---- Typed reads ----

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.read(key, ScalarKind::String)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.read(key, ScalarKind::Boolean)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.read(key, ScalarKind::Integer)
            .and_then(|v| v.as_i32())
            .unwrap_or(default)
    }

    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.read(key, ScalarKind::Long)
            .and_then(|v| v.as_i64())
            .unwrap_or(default)
    }

    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.read(key, ScalarKind::Float)
            .and_then(|v| v.as_f32())
            .unwrap_or(default)
    }

    /// Whether the master store holds an entry at `(key, kind)`.
    /// Returns `false` on any failure.
    pub fn contains(&self, key: &str, kind: ScalarKind) -> bool {
        self.read(key, kind).is_some()
    }

    // ---- Write sessions ----

    /// Open a batched write session.
    ///
    /// Re-resolves the master first: a write must always land on the
    /// current master, and the master may have changed since this facade
    /// last looked.
    pub fn edit(&self) -> PrefsResult<Editor<'_>> {
        let master = self.refresh_master()?;
        Ok(Editor {
            prefs: self,
            master,
            changes: ChangeSet::new(),
        })
    }

    // ---- Unsupported by design ----

    /// Full-set enumeration is not part of the replication contract.
    pub fn get_all(&self) -> PrefsResult<HashMap<String, ScalarValue>> {
        Err(PrefsError::Unsupported("get_all"))
    }

    /// String sets are outside the five supported scalar kinds.
    pub fn get_string_set(&self, _key: &str) -> PrefsResult<Vec<String>> {
        Err(PrefsError::Unsupported("get_string_set"))
    }

    /// Change listeners are not supported; replication happens through the
    /// broadcast channel, not through observer callbacks.
    pub fn register_change_listener(&self) -> PrefsResult<()> {
        Err(PrefsError::Unsupported("register_change_listener"))
    }
}

impl std::fmt::Debug for SharedPrefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPrefs")
            .field("master", &self.master())
            .finish()
    }
}

/// A batched write session against the master resolved at [`SharedPrefs::edit`]
/// time.
///
/// Accumulate puts and removes, then [`Editor::commit`]. Do not hold an
/// editor across sessions; get one, chain, commit.
#[must_use = "an editor does nothing until committed"]
pub struct Editor<'a> {
    prefs: &'a SharedPrefs,
    master: PeerId,
    changes: ChangeSet,
}

impl Editor<'_> {
    pub fn put_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.changes.put(key, value.into());
        self
    }

    pub fn put_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.changes.put(key, value);
        self
    }

    pub fn put_i32(mut self, key: impl Into<String>, value: i32) -> Self {
        self.changes.put(key, value);
        self
    }

    pub fn put_i64(mut self, key: impl Into<String>, value: i64) -> Self {
        self.changes.put(key, value);
        self
    }

    pub fn put_f32(mut self, key: impl Into<String>, value: f32) -> Self {
        self.changes.put(key, value);
        self
    }

    /// Remove `key` under every kind it is stored as.
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.changes.remove(key);
        self
    }

    /// String sets are outside the five supported scalar kinds.
    pub fn put_string_set(self, _key: &str, _values: Vec<String>) -> PrefsResult<Self> {
        Err(PrefsError::Unsupported("put_string_set"))
    }

    /// Clear the master store immediately.
    ///
    /// Unlike puts and removes, clearing bypasses the batch (it is an
    /// addressed `clear_all`, not an entry mutation) and is not broadcast
    /// to peers.
    pub fn clear(self) -> PrefsResult<Self> {
        self.prefs.store.clear_all(&self.master)?;
        Ok(self)
    }

    /// Commit the batch to the master, then notify peers.
    ///
    /// Propagation happens only after the addressed write succeeded
    /// (propagate-after-commit); a failed commit broadcasts nothing.
    pub fn commit(self) -> PrefsResult<()> {
        if self.changes.is_empty() {
            return Ok(());
        }
        self.prefs.store.write(&self.master, &self.changes)?;
        self.prefs
            .propagator
            .notify_peers(&self.master, &self.changes);
        Ok(())
    }
}
