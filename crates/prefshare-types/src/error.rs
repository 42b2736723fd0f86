use thiserror::Error;

/// Errors produced by value-type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A wire type tag outside the five supported scalar kinds.
    #[error("unsupported value type: {0}")]
    UnsupportedType(String),

    /// A value that does not match its declared kind.
    #[error("value does not match declared type '{kind}': {value}")]
    ValueMismatch { kind: String, value: String },
}
