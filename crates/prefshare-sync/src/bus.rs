use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::channel::{PeerChannel, PeerSubscriber};
use crate::error::SyncResult;

/// In-process broadcast bus implementing both channel seams.
///
/// Delivers each payload to every subscriber synchronously, in
/// subscription order. The delivery order across subscribers is an
/// implementation accident, not part of the [`PeerChannel`] contract —
/// tests must not rely on more than the contract promises.
///
/// The sender's own subscriber receives the payload too; self-echo
/// suppression in the receiver is what keeps that harmless, exactly as on
/// a real shared broadcast channel.
pub struct LocalBus {
    subscribers: RwLock<Vec<Arc<dyn PeerSubscriber>>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Register a receiver. There is no unsubscribe; a bus lives as long
    /// as the device simulation that owns it.
    pub fn subscribe(&self, subscriber: Arc<dyn PeerSubscriber>) {
        self.subscribers
            .write()
            .expect("lock poisoned")
            .push(subscriber);
    }

    /// Number of registered receivers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().expect("lock poisoned").len()
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerChannel for LocalBus {
    fn send(&self, payload: &[u8]) -> SyncResult<()> {
        let subscribers = self.subscribers.read().expect("lock poisoned").clone();
        debug!(receivers = subscribers.len(), "fanning out payload");
        for subscriber in subscribers {
            subscriber.on_payload(payload);
        }
        Ok(())
    }
}
