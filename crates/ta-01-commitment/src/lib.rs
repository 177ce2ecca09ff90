//! # Commitment Subsystem (TA-01)
//!
//! Turns a structured event payload into canonical bytes and a salted
//! SHA-256 commitment, and re-derives that commitment during verification.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure, synchronous logic; no I/O
//!   - `canonical`: tagged value tree and its deterministic JSON encoding
//!   - `commitment`: salt generation, `commit`, `verify`
//!
//! ## Security Notes
//!
//! - Salts come from the OS CSPRNG; a fixed or zero salt is never produced.
//! - The commitment is computed over canonical bytes, never over ciphertext.
//! - Digest comparison is constant-time.

pub mod domain;

pub use domain::canonical::{
    canonical_payload, canonicalize, canonicalize_to_string, CanonicalNumber, CanonicalValue,
    MAX_DEPTH,
};
pub use domain::commitment::{
    commit, commit_bytes, commit_payload, generate_salt, parse_commitment, verify, verify_hex,
    verify_payload, CommitmentEngine, CommitmentOutput, VerificationOutcome,
};
pub use domain::errors::{CanonicalizationError, CommitmentError};
