//! Master election for prefshare.
//!
//! Given the peers the directory discovered, [`ElectionEngine`] determines
//! which one is the authoritative master store. The protocol is a single
//! pass over the candidates:
//!
//! 1. The first peer observed with the master flag set wins.
//! 2. Any later peer also flagged master is demoted in place (stale or
//!    duplicate delegation, possible after a promotion race).
//! 3. If nobody is flagged, the first candidate is promoted.
//!
//! The tie-break is list order — deterministic and coordination-free, not a
//! recency guarantee. Running the election twice with no external mutation
//! converges on the same identifier, which is what keeps concurrent
//! re-resolution from independent processes safe without cross-process
//! locking: a transient two-master window is corrected lazily by the
//! demotion step on the next resolution.

pub mod engine;
pub mod error;

pub use engine::ElectionEngine;
pub use error::{ElectionError, ElectionResult};
