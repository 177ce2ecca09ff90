//! # Signature Errors
//!
//! Every variant means recovery is cryptographically impossible. A
//! well-formed signature from the wrong key is not an error; it recovers a
//! different address.

use thiserror::Error;

/// Errors that can occur during signer recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Signature is not 65 bytes `r || s || v`.
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    /// `r` or `s` outside `[1, n-1]`.
    #[error("Signature scalar out of range")]
    ScalarOutOfRange,

    /// Signature has high S value (EIP-2 malleability protection).
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28).
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// No public key satisfies the signature for this digest.
    #[error("Failed to recover public key")]
    RecoveryFailed,
}
