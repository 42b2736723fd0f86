use regex::Regex;

use prefshare_types::PeerId;

use crate::error::{DirectoryError, DirectoryResult};

/// The three mandatory settings of a prefshare process.
///
/// Read once at construction; all validation happens here so that a
/// misconfigured process fails immediately rather than on some later
/// discovery call.
#[derive(Clone, Debug)]
pub struct DirectoryConfig {
    identity_pattern: Regex,
    shared_credential: String,
    self_identity: PeerId,
}

impl DirectoryConfig {
    /// Build a validated configuration.
    ///
    /// - `identity_pattern`: regular expression a peer identifier must
    ///   match in full to be eligible.
    /// - `shared_credential`: the write credential peers must present.
    /// - `self_identity`: this process's own identifier, used for
    ///   self-echo suppression.
    ///
    /// An empty value for any of the three is a fatal
    /// [`DirectoryError::MissingConfig`].
    pub fn new(
        identity_pattern: &str,
        shared_credential: impl Into<String>,
        self_identity: impl Into<PeerId>,
    ) -> DirectoryResult<Self> {
        if identity_pattern.is_empty() {
            return Err(DirectoryError::MissingConfig("identity_pattern"));
        }
        let shared_credential = shared_credential.into();
        if shared_credential.is_empty() {
            return Err(DirectoryError::MissingConfig("shared_credential"));
        }
        let self_identity = self_identity.into();
        if self_identity.is_empty() {
            return Err(DirectoryError::MissingConfig("self_identity"));
        }
        // Anchored: a peer identifier must match the pattern in full, not
        // merely contain a match.
        let anchored = format!("^(?:{identity_pattern})$");
        let identity_pattern =
            Regex::new(&anchored).map_err(|source| DirectoryError::InvalidPattern {
                pattern: identity_pattern.to_string(),
                source,
            })?;
        Ok(Self {
            identity_pattern,
            shared_credential,
            self_identity,
        })
    }

    pub fn identity_pattern(&self) -> &Regex {
        &self.identity_pattern
    }

    pub fn shared_credential(&self) -> &str {
        &self.shared_credential
    }

    pub fn self_identity(&self) -> &PeerId {
        &self.self_identity
    }

    /// Whether `identifier` matches the identity pattern in full.
    pub fn matches_identity(&self, identifier: &str) -> bool {
        self.identity_pattern.is_match(identifier)
    }
}
