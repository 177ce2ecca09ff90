//! # Shared Crypto - Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, Keccak-256 | Commitments, typed-data digests |
//! | `symmetric` | AES-256-GCM | Artifact body encryption |
//! | `ecdsa` | secp256k1 | Participant signing (wallet side, tests) |
//!
//! ## Security Properties
//!
//! - **AES-256-GCM**: fresh 96-bit nonce per seal, fails closed on tag mismatch
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **Randomness**: all salts, nonces and keys come from the OS-seeded CSPRNG

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod symmetric;

// Re-exports
pub use ecdsa::Secp256k1KeyPair;
pub use errors::CryptoError;
pub use hashing::{keccak256, sha256, sha256_concat};
pub use symmetric::{open, random_bytes, seal, SealedBox, SecretKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
