use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identifier of one store endpoint (an opaque namespace/authority string).
///
/// `PeerId`s are compared by content. An empty id marks a malformed
/// third-party registration; discovery and election skip such peers rather
/// than fail on them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PeerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One discovered store endpoint eligible to participate in the shared
/// store.
///
/// Peers are created transiently each time discovery runs and are never
/// persisted. Equality and hashing are by [`PeerId`] only; the credential a
/// peer was found under is carried for logging, not identity.
#[derive(Clone, Debug)]
pub struct Peer {
    pub id: PeerId,
    pub write_credential: String,
}

impl Peer {
    pub fn new(id: impl Into<PeerId>, write_credential: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            write_credential: write_credential.into(),
        }
    }
}

impl PartialEq for Peer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Peer {}

impl Hash for Peer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
