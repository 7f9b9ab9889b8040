//! Error types for the persistence layer.
//!
//! All errors are propagated via [`StoreError`], which wraps the
//! underlying [`fred`], I/O, and serialization errors. Note that the
//! gateway's load path absorbs every one of these internally -- a failed
//! load degrades to "no saved state" and never reaches the caller.

/// Errors that can occur in the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A Redis operation failed.
    #[error("Redis error: {0}")]
    Redis(#[from] fred::error::Error),

    /// A file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error (e.g. an unparseable connection URL).
    #[error("configuration error: {0}")]
    Config(String),
}
