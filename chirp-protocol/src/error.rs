//! Error types for each part of the contract.

use thiserror::Error;

/// Registration errors. These are configuration errors: they surface at
/// startup and are never retried.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No registry was installed on the host before registration.
    #[error("island registry missing: cannot register primitive '{primitive}'")]
    Missing {
        /// The primitive that tried to register.
        primitive: String,
    },

    /// The registry refuses to replace an existing registration.
    #[error("primitive '{primitive}' is already registered")]
    Duplicate {
        /// The primitive name already taken.
        primitive: String,
    },

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Key-value store errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A read failed.
    #[error("read failed for {key}: {message}")]
    ReadFailed {
        /// The key being read.
        key: String,
        /// What went wrong.
        message: String,
    },

    /// A write failed.
    #[error("write failed for {key}: {message}")]
    WriteFailed {
        /// The key being written.
        key: String,
        /// What went wrong.
        message: String,
    },

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from the host-side mount driver.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MountError {
    /// No adapter is registered under this name.
    #[error("no primitive registered as '{0}'")]
    UnknownPrimitive(String),

    /// The element carries no primitive marker.
    #[error("element {0} has no island marker")]
    MissingMarker(String),
}
