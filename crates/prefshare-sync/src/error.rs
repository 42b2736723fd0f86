use thiserror::Error;

/// Errors from change propagation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The payload envelope could not be parsed at all.
    ///
    /// Per-entry problems are not this error; they surface as
    /// `TypeError`s on individual entries and never reject the envelope.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// JSON encoding failure.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The broadcast could not be handed to the transport.
    ///
    /// Propagation is best-effort; callers log and drop this.
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Result alias for propagation operations.
pub type SyncResult<T> = Result<T, SyncError>;
