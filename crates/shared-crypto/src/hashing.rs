//! # Hashing
//!
//! SHA-256 for commitments, Keccak-256 for typed-data digests and addresses.

use sha2::Sha256;
use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// SHA-256 of a single input.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// SHA-256 over the concatenation of `parts`, without materializing it.
pub fn sha256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Keccak-256 (the pre-standard SHA-3 variant used by Ethereum).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
