//! Peer discovery for prefshare.
//!
//! The directory enumerates locally installed store endpoints through the
//! [`EndpointSource`] collaborator, then filters them down to the peers
//! eligible to participate in the shared store: non-empty identifier,
//! identifier matching the configured identity pattern, and write
//! credential equal to the configured shared credential.

pub mod config;
pub mod directory;
pub mod endpoint;
pub mod error;

pub use config::DirectoryConfig;
pub use directory::PeerDirectory;
pub use endpoint::{Endpoint, EndpointSource, StaticEndpoints};
pub use error::{DirectoryError, DirectoryResult};
