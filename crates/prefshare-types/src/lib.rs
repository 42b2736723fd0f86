//! Foundation types for prefshare.
//!
//! This crate provides the identity, value, and change-batch types used
//! throughout the prefshare system. Every other prefshare crate depends on
//! `prefshare-types`.
//!
//! # Key Types
//!
//! - [`PeerId`] / [`Peer`] — identity of one discovered store endpoint
//! - [`ScalarKind`] / [`ScalarValue`] — the closed set of supported value
//!   types, addressed as `(key, kind)` pairs
//! - [`ChangeSet`] — ordered batch of mutations produced by one write session
//! - [`keys`] — reserved protocol keys excluded from replication

pub mod changeset;
pub mod error;
pub mod keys;
pub mod peer;
pub mod scalar;

pub use changeset::{ChangeSet, Mutation};
pub use error::TypeError;
pub use peer::{Peer, PeerId};
pub use scalar::{ScalarKind, ScalarValue};
