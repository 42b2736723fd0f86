use std::sync::Arc;

use tracing::{debug, warn};

use prefshare_store::ScalarStore;
use prefshare_types::{keys, ChangeSet, PeerId};

use crate::channel::PeerSubscriber;
use crate::wire;

/// Incoming side of replication: applies remote change events to this
/// peer's own store.
///
/// One replicator is registered per peer process. It discards self-echoes
/// (its own identity matching the event origin), skips reserved protocol
/// keys, and applies the remaining entries one at a time — an entry that
/// fails to decode or apply is logged and skipped, never aborting the rest
/// of the batch.
pub struct Replicator {
    self_identity: PeerId,
    store: Arc<dyn ScalarStore>,
}

impl Replicator {
    pub fn new(self_identity: PeerId, store: Arc<dyn ScalarStore>) -> Self {
        Self {
            self_identity,
            store,
        }
    }

    pub fn self_identity(&self) -> &PeerId {
        &self.self_identity
    }

    fn is_self_echo(&self, origin: &str) -> bool {
        // An empty own identity means this process cannot tell its own
        // events apart; dropping everything is the only loop-safe choice.
        self.self_identity.is_empty()
            || self.self_identity.as_str().eq_ignore_ascii_case(origin)
    }
}

impl PeerSubscriber for Replicator {
    fn on_payload(&self, payload: &[u8]) {
        let event = match wire::decode(payload) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "dropping undecodable change event");
                return;
            }
        };
        if self.is_self_echo(&event.origin) {
            debug!(origin = %event.origin, "skipping self-echo");
            return;
        }
        debug!(
            origin = %event.origin,
            entries = event.entries.len(),
            "applying remote change event"
        );
        for entry in event.entries {
            let (key, mutation) = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Partial application: the rest of the batch still
                    // lands.
                    warn!(%err, "skipping unsupported entry");
                    continue;
                }
            };
            if keys::is_reserved(&key) {
                debug!(key = %key, "skipping reserved key from remote event");
                continue;
            }
            let single: ChangeSet = std::iter::once((key.clone(), mutation)).collect();
            if let Err(err) = self.store.apply(&single) {
                warn!(key = %key, %err, "failed to apply remote entry");
            }
        }
    }
}
