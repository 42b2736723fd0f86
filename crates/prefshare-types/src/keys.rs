//! Reserved protocol keys.
//!
//! These keys live inside peer stores alongside domain data but belong to
//! the replication protocol itself. They are never propagated to peers and
//! are skipped if a foreign peer embeds them in an incoming change set.

/// Boolean sentinel marking a peer as the elected master.
///
/// Only the election engine may write this key.
pub const MASTER_KEY: &str = "master";

/// Marker naming the originator of a change event.
pub const SENDER_KEY: &str = "sender_identity";

/// Returns `true` if `key` is reserved for protocol use.
pub fn is_reserved(key: &str) -> bool {
    key == MASTER_KEY || key == SENDER_KEY
}
