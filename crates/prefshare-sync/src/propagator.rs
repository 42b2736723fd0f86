use std::sync::Arc;

use tracing::{debug, warn};

use prefshare_types::{ChangeSet, PeerId};

use crate::channel::PeerChannel;
use crate::wire;

/// Outgoing side of replication.
///
/// Serializes a committed change set and hands it to the broadcast
/// channel. Strictly fire-and-forget: failures are logged and dropped, and
/// nothing here mutates local state. Propagation is a side channel of a
/// write, never part of its success contract.
pub struct Propagator {
    channel: Arc<dyn PeerChannel>,
}

impl Propagator {
    pub fn new(channel: Arc<dyn PeerChannel>) -> Self {
        Self { channel }
    }

    /// Broadcast `changes` on behalf of `origin`.
    ///
    /// Reserved protocol keys are stripped first; a session that only
    /// touched protocol keys produces no broadcast at all.
    pub fn notify_peers(&self, origin: &PeerId, changes: &ChangeSet) {
        let outgoing = changes.without_reserved();
        if outgoing.is_empty() {
            debug!(origin = %origin, "nothing to propagate");
            return;
        }
        let payload = match wire::encode(origin, &outgoing) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(origin = %origin, %err, "failed to encode change event");
                return;
            }
        };
        debug!(origin = %origin, entries = outgoing.len(), "broadcasting change event");
        if let Err(err) = self.channel.send(&payload) {
            debug!(origin = %origin, %err, "broadcast dropped");
        }
    }
}
