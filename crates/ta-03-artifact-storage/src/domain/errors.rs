//! # Domain Errors
//!
//! Reasons carried by these errors never include filesystem paths.

use thiserror::Error;

/// Errors from the content-addressed store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArtifactStoreError {
    /// Namespace is not a `0x`-prefixed 64-digit hex batch id.
    #[error("Invalid namespace")]
    InvalidNamespace,

    /// Identifier contains characters outside `[A-Za-z0-9._-]`, is `.`/`..`,
    /// empty, or too long.
    #[error("Invalid identifier")]
    InvalidIdentifier,

    /// Artifact exceeds the configured byte ceiling.
    #[error("Artifact too large: {size} bytes exceeds limit of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// No artifact at `(namespace, identifier)`.
    #[error("Artifact not found: {namespace}/{identifier}")]
    NotFound {
        namespace: String,
        identifier: String,
    },

    /// Fresh identifiers kept colliding with existing artifacts.
    #[error("Could not allocate a fresh identifier")]
    IdentifierExhausted,

    /// Backend I/O failure. Safe to retry with backoff.
    #[error("Storage I/O error: {reason}")]
    Io { reason: String },
}

impl ArtifactStoreError {
    /// Transient infrastructure fault.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::IdentifierExhausted)
    }
}
