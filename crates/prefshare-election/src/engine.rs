use std::sync::Arc;

use tracing::{debug, warn};

use prefshare_store::PeerStore;
use prefshare_types::{keys, ChangeSet, Peer, PeerId, ScalarKind};

use crate::error::{ElectionError, ElectionResult};

/// Resolves the single master among discovered peers.
///
/// The engine is the only component allowed to mutate the master flag on
/// peers. It holds no state of its own between resolutions; the flag stored
/// in each peer's store is the entire election state.
pub struct ElectionEngine {
    store: Arc<dyn PeerStore>,
}

impl ElectionEngine {
    pub fn new(store: Arc<dyn PeerStore>) -> Self {
        Self { store }
    }

    /// Determine the current master among `peers`.
    ///
    /// Fails with [`ElectionError::NoPeers`] on an empty candidate list.
    /// Peers with empty identifiers are skipped. The common case (one
    /// master already delegated) is a single read-only pass; writes happen
    /// only to demote duplicates or to promote a first master.
    ///
    /// Callers that only read may cache the returned identifier for a
    /// while; callers that write must re-resolve immediately before every
    /// write session.
    pub fn resolve_master(&self, peers: &[Peer]) -> ElectionResult<PeerId> {
        if peers.is_empty() {
            return Err(ElectionError::NoPeers);
        }

        let mut winner: Option<PeerId> = None;
        for peer in peers {
            if peer.id.is_empty() {
                continue;
            }
            let is_master = self.is_master(&peer.id);
            debug!(peer = %peer.id, is_master, "observed master flag");
            if !is_master {
                continue;
            }
            if winner.is_none() {
                winner = Some(peer.id.clone());
            } else {
                // A duplicate delegation, e.g. two processes promoted
                // concurrently. Demote in place; the outcome of this write
                // does not change the election result.
                debug!(peer = %peer.id, "demoting duplicate master");
                self.delegate(&peer.id, false);
            }
        }

        if let Some(winner) = winner {
            return Ok(winner);
        }

        // Nobody is flagged: promote the first viable candidate.
        let candidate = peers
            .iter()
            .find(|peer| !peer.id.is_empty())
            .ok_or(ElectionError::NoViableCandidate)?;
        debug!(peer = %candidate.id, "no master found, promoting first candidate");
        self.delegate(&candidate.id, true);
        Ok(candidate.id.clone())
    }

    /// Query a peer's master flag.
    ///
    /// Unreachable peer, absent entry, or a non-boolean value all read as
    /// `false`: an unreachable peer must never become the tentative winner
    /// by omission, and a flag query must never abort resolution.
    fn is_master(&self, peer: &PeerId) -> bool {
        match self.store.read(peer, keys::MASTER_KEY, ScalarKind::Boolean) {
            Ok(Some(value)) => value.as_bool().unwrap_or(false),
            Ok(None) => false,
            Err(err) => {
                debug!(peer = %peer, %err, "master flag query failed, assuming false");
                false
            }
        }
    }

    /// Write a peer's master flag. Fire-and-forget: failures are logged and
    /// swallowed, leaving convergence to the next resolution.
    fn delegate(&self, peer: &PeerId, is_master: bool) {
        let flag = ChangeSet::single(keys::MASTER_KEY, is_master);
        if let Err(err) = self.store.write(peer, &flag) {
            warn!(peer = %peer, is_master, %err, "master delegation write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefshare_store::{MemoryHub, ScalarStore};
    use prefshare_types::ScalarValue;

    fn peer(id: &str) -> Peer {
        Peer::new(id, "com.owlr.PERMISSION")
    }

    /// Hub with the given peers registered, flagged per `masters`.
    fn hub_with(peers: &[(&str, bool)]) -> Arc<MemoryHub> {
        let hub = Arc::new(MemoryHub::new());
        for (id, is_master) in peers {
            let store = hub.register(PeerId::new(*id));
            if *is_master {
                store
                    .apply(&ChangeSet::single(keys::MASTER_KEY, true))
                    .unwrap();
            }
        }
        hub
    }

    fn flag_of(hub: &MemoryHub, id: &str) -> Option<ScalarValue> {
        hub.store_of(&PeerId::new(id))
            .unwrap()
            .get(keys::MASTER_KEY, ScalarKind::Boolean)
            .unwrap()
    }

    // -----------------------------------------------------------------------
    // Preconditions
    // -----------------------------------------------------------------------

    #[test]
    fn empty_peer_list_is_a_precondition_error() {
        let engine = ElectionEngine::new(hub_with(&[]));
        assert!(matches!(
            engine.resolve_master(&[]),
            Err(ElectionError::NoPeers)
        ));
    }

    #[test]
    fn all_empty_identifiers_is_no_viable_candidate() {
        let engine = ElectionEngine::new(hub_with(&[]));
        let peers = vec![peer(""), peer("")];
        assert!(matches!(
            engine.resolve_master(&peers),
            Err(ElectionError::NoViableCandidate)
        ));
    }

    // -----------------------------------------------------------------------
    // The three canonical scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn existing_master_wins_without_writes() {
        let hub = hub_with(&[("com.owlr.a", false), ("com.owlr.b", true)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);

        let master = engine
            .resolve_master(&[peer("com.owlr.a"), peer("com.owlr.b")])
            .unwrap();

        assert_eq!(master.as_str(), "com.owlr.b");
        // No writes were issued: "a" still has no flag entry at all.
        assert_eq!(flag_of(&hub, "com.owlr.a"), None);
        assert_eq!(flag_of(&hub, "com.owlr.b"), Some(ScalarValue::Bool(true)));
    }

    #[test]
    fn no_master_promotes_the_first_peer_only() {
        let hub = hub_with(&[("com.owlr.a", false), ("com.owlr.b", false)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);

        let master = engine
            .resolve_master(&[peer("com.owlr.a"), peer("com.owlr.b")])
            .unwrap();

        assert_eq!(master.as_str(), "com.owlr.a");
        assert_eq!(flag_of(&hub, "com.owlr.a"), Some(ScalarValue::Bool(true)));
        assert_eq!(flag_of(&hub, "com.owlr.b"), None);
    }

    #[test]
    fn duplicate_masters_converge_on_the_first() {
        let hub = hub_with(&[("com.owlr.a", true), ("com.owlr.b", true)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);

        let master = engine
            .resolve_master(&[peer("com.owlr.a"), peer("com.owlr.b")])
            .unwrap();

        assert_eq!(master.as_str(), "com.owlr.a");
        assert_eq!(flag_of(&hub, "com.owlr.a"), Some(ScalarValue::Bool(true)));
        // "b" received an explicit demotion write.
        assert_eq!(flag_of(&hub, "com.owlr.b"), Some(ScalarValue::Bool(false)));
    }

    // -----------------------------------------------------------------------
    // Degraded peers
    // -----------------------------------------------------------------------

    #[test]
    fn empty_identifier_candidates_are_skipped() {
        let hub = hub_with(&[("com.owlr.b", true)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);

        let master = engine
            .resolve_master(&[peer(""), peer("com.owlr.b")])
            .unwrap();
        assert_eq!(master.as_str(), "com.owlr.b");
    }

    #[test]
    fn unreachable_peer_reads_as_not_master() {
        // "ghost" is in the candidate list but has no registered store.
        let hub = hub_with(&[("com.owlr.b", true)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);

        let master = engine
            .resolve_master(&[peer("com.owlr.ghost"), peer("com.owlr.b")])
            .unwrap();
        assert_eq!(master.as_str(), "com.owlr.b");
    }

    #[test]
    fn unreachable_first_peer_still_gets_promoted() {
        // Promotion write to an unreachable peer fails silently; the chosen
        // identifier is returned regardless, converging on a later pass.
        let hub = hub_with(&[("com.owlr.b", false)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);

        let master = engine
            .resolve_master(&[peer("com.owlr.ghost"), peer("com.owlr.b")])
            .unwrap();
        assert_eq!(master.as_str(), "com.owlr.ghost");
    }

    #[test]
    fn non_boolean_master_flag_reads_as_false() {
        let hub = hub_with(&[("com.owlr.a", false), ("com.owlr.b", false)]);
        hub.store_of(&PeerId::new("com.owlr.b"))
            .unwrap()
            .apply(&ChangeSet::single(keys::MASTER_KEY, "yes"))
            .unwrap();
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);

        let master = engine
            .resolve_master(&[peer("com.owlr.a"), peer("com.owlr.b")])
            .unwrap();
        assert_eq!(master.as_str(), "com.owlr.a");
    }

    // -----------------------------------------------------------------------
    // Idempotence and determinism
    // -----------------------------------------------------------------------

    #[test]
    fn resolving_twice_returns_the_same_identifier() {
        let hub = hub_with(&[("com.owlr.a", false), ("com.owlr.b", false)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);
        let peers = vec![peer("com.owlr.a"), peer("com.owlr.b")];

        let first = engine.resolve_master(&peers).unwrap();
        let second = engine.resolve_master(&peers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resolution_after_duplicate_cleanup_is_stable() {
        let hub = hub_with(&[("com.owlr.a", true), ("com.owlr.b", true)]);
        let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);
        let peers = vec![peer("com.owlr.a"), peer("com.owlr.b")];

        let first = engine.resolve_master(&peers).unwrap();
        let second = engine.resolve_master(&peers).unwrap();
        assert_eq!(first, second);
        assert_eq!(flag_of(&hub, "com.owlr.b"), Some(ScalarValue::Bool(false)));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Distinct identifiers; duplicates would alias one store.
        fn ids_strategy() -> impl Strategy<Value = Vec<String>> {
            proptest::collection::hash_set("com\\.owlr\\.[a-z]{1,8}", 1..6)
                .prop_map(|set| set.into_iter().collect())
        }

        proptest! {
            /// With no peer flagged, the first candidate always wins,
            /// whatever the list looks like.
            #[test]
            fn promotes_first_candidate(ids in ids_strategy()) {
                let hub = Arc::new(MemoryHub::new());
                for id in &ids {
                    hub.register(PeerId::new(id.clone()));
                }
                let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);
                let peers: Vec<Peer> = ids.iter().map(|id| peer(id)).collect();

                let master = engine.resolve_master(&peers).unwrap();
                prop_assert_eq!(master.as_str(), ids[0].as_str());
            }

            /// Resolution is idempotent: a second run with no external
            /// mutation returns the same identifier and leaves exactly one
            /// flagged master among reachable peers.
            #[test]
            fn converges_to_one_master(
                ids in ids_strategy(),
                master_mask in proptest::collection::vec(any::<bool>(), 6),
            ) {
                let hub = Arc::new(MemoryHub::new());
                for (i, id) in ids.iter().enumerate() {
                    let store = hub.register(PeerId::new(id.clone()));
                    if master_mask[i] {
                        store.apply(&ChangeSet::single(keys::MASTER_KEY, true)).unwrap();
                    }
                }
                let engine = ElectionEngine::new(Arc::clone(&hub) as Arc<dyn PeerStore>);
                let peers: Vec<Peer> = ids.iter().map(|id| peer(id)).collect();

                let first = engine.resolve_master(&peers).unwrap();
                let second = engine.resolve_master(&peers).unwrap();
                prop_assert_eq!(&first, &second);

                let flagged: Vec<&String> = ids
                    .iter()
                    .filter(|id| {
                        hub.store_of(&PeerId::new((*id).clone()))
                            .unwrap()
                            .get(keys::MASTER_KEY, ScalarKind::Boolean)
                            .unwrap()
                            .and_then(|v| v.as_bool())
                            .unwrap_or(false)
                    })
                    .collect();
                prop_assert_eq!(flagged.len(), 1);
                prop_assert_eq!(flagged[0].as_str(), first.as_str());
            }
        }
    }
}
