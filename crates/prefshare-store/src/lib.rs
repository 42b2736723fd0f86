//! Typed scalar storage for prefshare.
//!
//! Two seams are defined here:
//!
//! - [`ScalarStore`] — one peer's own key/value data, addressed by
//!   `(key, kind)` pairs.
//! - [`PeerStore`] — the peer-addressed remote store interface consumed by
//!   the election engine and the store facade. Conceptually a blocking
//!   query against another process's store.
//!
//! [`MemoryStore`] and [`MemoryHub`] are the in-memory implementations,
//! suitable for tests and single-process embedding.

pub mod error;
pub mod hub;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use hub::MemoryHub;
pub use memory::MemoryStore;
pub use traits::{PeerStore, ScalarStore};
