//! # Commitment Engine
//!
//! `commitment = SHA-256(canonical_bytes || salt)` with a fresh 32-byte salt
//! per event. Verification re-derives the digest and compares it in
//! constant time.

use super::canonical::{canonical_payload, canonicalize, CanonicalValue};
use super::errors::CommitmentError;
use shared_crypto::{random_bytes, sha256_concat};
use shared_types::{Commitment, EventPayload, Salt};
use subtle::ConstantTimeEq;

/// Result of committing to a payload.
#[derive(Clone, PartialEq, Eq)]
pub struct CommitmentOutput {
    /// Canonical bytes that were hashed.
    pub canonical: Vec<u8>,
    /// The salted digest.
    pub commitment: Commitment,
}

impl std::fmt::Debug for CommitmentOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitmentOutput")
            .field("canonical_len", &self.canonical.len())
            .field("commitment", &self.commitment)
            .finish()
    }
}

/// Result of re-deriving a commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Whether the recomputed digest equals the expected one.
    pub matches: bool,
    /// The digest recomputed from payload and salt.
    pub recomputed: Commitment,
}

/// Fresh salt from the OS CSPRNG.
pub fn generate_salt() -> Salt {
    Salt(random_bytes::<32>())
}

/// Commit to already-canonical bytes.
pub fn commit_bytes(canonical: &[u8], salt: &Salt) -> Commitment {
    Commitment(sha256_concat(&[canonical, salt.as_bytes()]))
}

/// Canonicalize `payload` and commit to it.
///
/// # Errors
///
/// - `EmptyPayload` when `payload` is `Null`
/// - `Canonicalization` when the payload has no canonical form
pub fn commit(payload: &CanonicalValue, salt: &Salt) -> Result<CommitmentOutput, CommitmentError> {
    if matches!(payload, CanonicalValue::Null) {
        return Err(CommitmentError::EmptyPayload);
    }
    let canonical = canonicalize(payload)?;
    let commitment = commit_bytes(&canonical, salt);
    tracing::trace!(
        "[ta-01] committed {} canonical bytes -> {}",
        canonical.len(),
        commitment
    );
    Ok(CommitmentOutput {
        canonical,
        commitment,
    })
}

/// Commit to an `EventPayload` in its `{batchId, data, eventType}` shape.
pub fn commit_payload(
    payload: &EventPayload,
    salt: &Salt,
) -> Result<CommitmentOutput, CommitmentError> {
    commit(&canonical_payload(payload), salt)
}

/// Re-derive the commitment and compare against `expected` in constant time.
pub fn verify(
    payload: &CanonicalValue,
    salt: &Salt,
    expected: &Commitment,
) -> Result<VerificationOutcome, CommitmentError> {
    let recomputed = commit(payload, salt)?.commitment;
    let matches: bool = recomputed.as_bytes().ct_eq(expected.as_bytes()).into();
    Ok(VerificationOutcome {
        matches,
        recomputed,
    })
}

/// `verify` for an `EventPayload`.
pub fn verify_payload(
    payload: &EventPayload,
    salt: &Salt,
    expected: &Commitment,
) -> Result<VerificationOutcome, CommitmentError> {
    verify(&canonical_payload(payload), salt, expected)
}

/// Parse a 32-byte digest from hex, with or without `0x`, in either case.
pub fn parse_commitment(hex_digest: &str) -> Result<Commitment, CommitmentError> {
    hex_digest
        .trim()
        .parse()
        .map_err(|e: shared_types::TypeError| CommitmentError::MalformedDigest(e.to_string()))
}

/// `verify` against a hex digest. Case of the hex carries no meaning.
pub fn verify_hex(
    payload: &CanonicalValue,
    salt: &Salt,
    expected_hex: &str,
) -> Result<VerificationOutcome, CommitmentError> {
    let expected = parse_commitment(expected_hex)?;
    verify(payload, salt, &expected)
}

/// Stateless handle over the commitment functions, for callers that hold
/// their collaborators as fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitmentEngine;

impl CommitmentEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }

    /// See [`generate_salt`].
    pub fn generate_salt(&self) -> Salt {
        generate_salt()
    }

    /// See [`commit_payload`].
    pub fn commit(
        &self,
        payload: &EventPayload,
        salt: &Salt,
    ) -> Result<CommitmentOutput, CommitmentError> {
        commit_payload(payload, salt)
    }

    /// See [`verify_payload`].
    pub fn verify(
        &self,
        payload: &EventPayload,
        salt: &Salt,
        expected: &Commitment,
    ) -> Result<VerificationOutcome, CommitmentError> {
        verify_payload(payload, salt, expected)
    }
}
