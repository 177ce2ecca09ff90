//! # Storage Keys
//!
//! Namespaces and identifiers are validated here, before any backend sees
//! them. Nothing that fails these checks is ever joined into a path.

use super::errors::ArtifactStoreError;
use uuid::Uuid;

/// Extension appended to every generated identifier.
pub const IDENTIFIER_EXTENSION: &str = ".json";

/// Longest identifier accepted on reads.
pub const MAX_IDENTIFIER_LEN: usize = 128;

const NAMESPACE_HEX_DIGITS: usize = 64;

/// Validate a batch namespace (`0x` + 64 hex digits, either case) and
/// return its lowercase form.
pub fn validate_namespace(namespace: &str) -> Result<String, ArtifactStoreError> {
    let digits = namespace
        .strip_prefix("0x")
        .ok_or(ArtifactStoreError::InvalidNamespace)?;

    if digits.len() != NAMESPACE_HEX_DIGITS || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ArtifactStoreError::InvalidNamespace);
    }
    Ok(namespace.to_ascii_lowercase())
}

/// Validate an identifier against the allow-list `[A-Za-z0-9._-]+`.
pub fn validate_identifier(identifier: &str) -> Result<(), ArtifactStoreError> {
    let allowed = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-');

    if identifier.is_empty()
        || identifier.len() > MAX_IDENTIFIER_LEN
        || identifier == "."
        || identifier == ".."
        || !identifier.bytes().all(allowed)
    {
        return Err(ArtifactStoreError::InvalidIdentifier);
    }
    Ok(())
}

/// Fresh random identifier, `<uuid-v4>.json`.
pub fn new_identifier() -> String {
    format!("{}{}", Uuid::new_v4(), IDENTIFIER_EXTENSION)
}
