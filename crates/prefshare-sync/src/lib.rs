//! Change propagation for prefshare.
//!
//! When a write session commits on the master, the changed entries fan out
//! to every peer on the device over a broadcast channel. The contract is
//! deliberately weak: best-effort, unordered across peers, no delivery
//! confirmation and no retry. Replication correctness does not depend on
//! any single broadcast arriving; a peer that misses one converges on the
//! next write that reaches it.
//!
//! - [`PeerChannel`] / [`PeerSubscriber`] — the transport seams
//! - [`Propagator`] — outgoing side: filter reserved keys, encode, send
//! - [`Replicator`] — incoming side: self-echo suppression, tolerant
//!   per-entry decode, partial application
//! - [`LocalBus`] — in-process implementation of both seams

pub mod bus;
pub mod channel;
pub mod error;
pub mod propagator;
pub mod replicator;
pub mod wire;

pub use bus::LocalBus;
pub use channel::{PeerChannel, PeerSubscriber};
pub use error::{SyncError, SyncResult};
pub use propagator::Propagator;
pub use replicator::Replicator;
pub use wire::{decode, encode, DecodedEvent};
