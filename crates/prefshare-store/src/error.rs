use prefshare_types::PeerId;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed peer's store could not be reached.
    ///
    /// Callers resolving the master flag treat this as "flag absent"
    /// rather than as a fatal condition.
    #[error("peer unreachable: {0}")]
    PeerUnreachable(PeerId),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Failure in an underlying storage backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
