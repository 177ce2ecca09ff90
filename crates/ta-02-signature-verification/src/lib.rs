//! # Signature Verification Subsystem (TA-02)
//!
//! Recovers the address that signed an event's EIP-712 typed-data message.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Typed-data hashing and secp256k1 recovery, no I/O
//! - **Ports Layer** (`ports/`): Inbound API trait
//! - **Service Layer** (`service.rs`): Binds the domain to one signing domain
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Mismatch Is Not Failure**: a well-formed signature by another key
//!   recovers that key's address; the caller decides what a mismatch means
//! - The signed `data` field is the canonical JSON string of the payload's
//!   data mapping, never the structured object

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

// Re-export public API
pub use domain::ecdsa::{address_from_pubkey, check_signer, recover_address};
pub use domain::entities::{
    EcdsaSignature, EventMessage, SignerCheck, TypedDataDomain, DEFAULT_CHAIN_ID,
    DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION, SIGNATURE_LEN,
};
pub use domain::errors::SignatureError;
pub use domain::typed_data::{domain_separator, struct_hash, typed_data_digest};
pub use ports::inbound::SignatureVerificationApi;
pub use service::SignatureVerificationService;
