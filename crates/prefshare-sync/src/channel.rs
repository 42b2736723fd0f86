/// Local-device broadcast transport.
///
/// Interface contract, stated explicitly because callers must not assume
/// more than it promises:
///
/// - **Best-effort**: a successful `send` means the payload was handed to
///   the transport, not that any peer received it.
/// - **Unordered** across peers: two sends may arrive in different orders
///   at different peers.
/// - **No acknowledgment, no retry**: delivery failures are invisible to
///   the sender.
///
/// The channel is assumed to reach all peers on the same device; it is not
/// a network transport.
pub trait PeerChannel: Send + Sync {
    /// Broadcast an encoded change event to every peer.
    fn send(&self, payload: &[u8]) -> crate::error::SyncResult<()>;
}

/// Receiving side of the broadcast channel, registered once per peer
/// process.
///
/// Implementations must tolerate arbitrary payloads (the channel is shared
/// with whatever else the device broadcasts under the same credential) and
/// must never panic on malformed input.
pub trait PeerSubscriber: Send + Sync {
    fn on_payload(&self, payload: &[u8]);
}
