//! # Commitment Errors

use thiserror::Error;

/// A value has no defined canonical serialization.
///
/// Not retryable: the payload itself is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// NaN or an infinity.
    #[error("Number has no canonical form (NaN or infinite)")]
    NonFiniteNumber,

    /// The same key appears twice in one mapping.
    #[error("Duplicate key in mapping: {0:?}")]
    DuplicateKey(String),

    /// Nesting deeper than the supported maximum (also catches runaway
    /// self-referential structures built by callers).
    #[error("Nesting depth exceeds {max}")]
    DepthExceeded { max: usize },

    /// The source value could not be represented as a value tree.
    #[error("Unsupported value: {0}")]
    Unsupported(String),
}

/// Errors from the commitment engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommitmentError {
    /// Payload is absent.
    #[error("Payload is empty")]
    EmptyPayload,

    /// Payload could not be canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// Expected digest is not 32 bytes of hex.
    #[error("Malformed digest: {0}")]
    MalformedDigest(String),
}
