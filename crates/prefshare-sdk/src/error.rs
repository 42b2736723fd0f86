use thiserror::Error;

use prefshare_election::ElectionError;
use prefshare_store::StoreError;

/// Errors surfaced by the facade.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Master resolution failed (no discovered peers, or no viable one).
    #[error("election failed: {0}")]
    Election(#[from] ElectionError),

    /// An addressed write against the master failed.
    ///
    /// Reads never produce this; they fall back to the caller's default.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The operation is not implemented, by design.
    ///
    /// Full-set enumeration, string-set values, and change-listener
    /// registration are permanently outside the replication contract;
    /// callers must not rely on them.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Result alias for facade operations.
pub type PrefsResult<T> = Result<T, PrefsError>;
