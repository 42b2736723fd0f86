use std::sync::Arc;

use tracing::{debug, info};

use prefshare_types::Peer;

use crate::config::DirectoryConfig;
use crate::endpoint::EndpointSource;

/// Finds the peers eligible to participate in the shared store.
pub struct PeerDirectory {
    config: DirectoryConfig,
    source: Arc<dyn EndpointSource>,
}

impl PeerDirectory {
    pub fn new(config: DirectoryConfig, source: Arc<dyn EndpointSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Enumerate and filter installed endpoints.
    ///
    /// Freshly computed on every call. Keeps endpoints whose identifier is
    /// non-empty, matches the identity pattern in full, and whose write
    /// credential equals the shared credential (case-insensitively).
    /// Source order is preserved; an empty result is valid.
    pub fn discover_peers(&self) -> Vec<Peer> {
        info!(
            pattern = %self.config.identity_pattern(),
            credential = %self.config.shared_credential(),
            "discovering peers"
        );
        let endpoints = self.source.list_endpoints();
        let mut peers = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            // Malformed third-party registrations carry empty identifiers;
            // skip rather than fail.
            if endpoint.identifier.is_empty() {
                continue;
            }
            if !self.config.matches_identity(&endpoint.identifier) {
                continue;
            }
            let Some(credential) = endpoint.write_credential else {
                continue;
            };
            if !credential.eq_ignore_ascii_case(self.config.shared_credential()) {
                continue;
            }
            debug!(identifier = %endpoint.identifier, "endpoint matched");
            peers.push(Peer::new(endpoint.identifier, credential));
        }
        debug!(count = peers.len(), "discovery finished");
        peers
    }
}
