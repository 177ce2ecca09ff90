//! # Domain Layer
//!
//! Pure cryptographic logic: typed-data hashing and signer recovery.

pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod typed_data;
