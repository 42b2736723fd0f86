use thiserror::Error;

/// Errors from master resolution.
#[derive(Debug, Error)]
pub enum ElectionError {
    /// The caller supplied no candidates at all.
    ///
    /// At least one discovered peer is required for an election; this is a
    /// precondition failure of the call, not a transient condition.
    #[error("at least one peer is required to resolve a master")]
    NoPeers,

    /// Every supplied candidate had an empty identifier.
    ///
    /// Usually means the identity pattern or shared credential is
    /// misconfigured.
    #[error("no viable candidate to delegate as master")]
    NoViableCandidate,
}

/// Result alias for election operations.
pub type ElectionResult<T> = Result<T, ElectionError>;
