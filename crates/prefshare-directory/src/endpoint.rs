use std::sync::RwLock;

/// A store endpoint as registered with the host platform.
///
/// Raw, unfiltered registration data. Third-party applications register
/// endpoints too, including malformed ones with empty identifiers or no
/// write credential at all; filtering is the directory's job, not the
/// source's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub identifier: String,
    pub write_credential: Option<String>,
}

impl Endpoint {
    pub fn new(identifier: impl Into<String>, write_credential: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            write_credential: Some(write_credential.into()),
        }
    }

    /// An endpoint that declares no write credential.
    pub fn uncredentialed(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            write_credential: None,
        }
    }
}

/// Enumeration of every locally installed store endpoint.
///
/// This is the platform seam: a real implementation asks the host OS for
/// installed applications exposing a compatible store. The returned order
/// is preserved by discovery and decides election tie-breaks, so
/// implementations should be deterministic between calls when the
/// installed set has not changed.
pub trait EndpointSource: Send + Sync {
    fn list_endpoints(&self) -> Vec<Endpoint>;
}

/// A fixed, mutable endpoint list. For tests and embedding.
#[derive(Debug, Default)]
pub struct StaticEndpoints {
    endpoints: RwLock<Vec<Endpoint>>,
}

impl StaticEndpoints {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            endpoints: RwLock::new(endpoints),
        }
    }

    /// Replace the endpoint list, simulating installs/uninstalls.
    pub fn set(&self, endpoints: Vec<Endpoint>) {
        *self.endpoints.write().expect("lock poisoned") = endpoints;
    }
}

impl EndpointSource for StaticEndpoints {
    fn list_endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.read().expect("lock poisoned").clone()
    }
}
