use thiserror::Error;

/// Errors from directory configuration and discovery.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A mandatory configuration value is missing or empty.
    ///
    /// Fatal at construction time. Discovery itself never fails on
    /// malformed endpoints; those are skipped.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// The identity pattern is not a valid regular expression.
    #[error("invalid identity pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Result alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
