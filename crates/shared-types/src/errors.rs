//! # Error Types
//!
//! Parse and consistency errors for the shared wire types.

use thiserror::Error;

/// Errors raised while parsing or validating shared types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Value is not valid hexadecimal.
    #[error("Invalid hex for {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    /// Decoded value has the wrong byte length.
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Event type tag is not part of the fixed enumeration.
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// Role code is not part of the fixed enumeration.
    #[error("Unknown role code: {0}")]
    UnknownRole(u8),

    /// Artifact bytes could not be (de)serialized.
    #[error("Artifact serialization error: {0}")]
    Serialization(String),

    /// Artifact mode and envelope encryption metadata disagree.
    #[error("Inconsistent artifact: {0}")]
    InconsistentArtifact(&'static str),
}
