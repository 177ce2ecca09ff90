//! # Symmetric Encryption
//!
//! AES-256-GCM with a random 96-bit nonce per seal.
//!
//! ## Security Properties
//!
//! - A nonce is drawn from the OS CSPRNG for every call to [`seal`]; callers
//!   never supply one, so a nonce is not reused under the same key.
//! - [`open`] releases plaintext only after the tag verifies.

use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use shared_types::{AuthTag, GcmNonce};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-GCM tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Secret key (256-bit).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse 64 hex characters (optional `0x` prefix).
    ///
    /// # Errors
    ///
    /// `InvalidKeyEncoding` for non-hex input, `InvalidKeyLength` otherwise.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
        let mut bytes = hex::decode(digits).map_err(|_| CryptoError::InvalidKeyEncoding)?;
        if bytes.len() != 32 {
            let actual = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual,
            });
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(key))
    }

    /// Generate random key.
    pub fn generate() -> Self {
        Self(random_bytes())
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Output of [`seal`]: ciphertext with the nonce and tag kept separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedBox {
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Nonce used for this seal.
    pub nonce: GcmNonce,
    /// Authentication tag.
    pub tag: AuthTag,
}

/// Fill `N` bytes from the OS CSPRNG.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encrypt `plaintext` under `key` with a fresh nonce.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails.
pub fn seal(key: &SecretKey, plaintext: &[u8]) -> Result<SealedBox, CryptoError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let nonce = GcmNonce(random_bytes());

    let mut combined = cipher
        .encrypt(Nonce::from_slice(nonce.as_bytes()), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    // aes-gcm appends the tag to the ciphertext.
    let split = combined.len() - TAG_LEN;
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&combined[split..]);
    combined.truncate(split);

    Ok(SealedBox {
        ciphertext: combined,
        nonce,
        tag: AuthTag(tag),
    })
}

/// Decrypt and authenticate.
///
/// # Errors
///
/// Returns `CryptoError::AuthenticationFailed` on any tag mismatch (wrong key,
/// altered ciphertext, altered nonce or tag). No partial plaintext is returned.
pub fn open(
    key: &SecretKey,
    ciphertext: &[u8],
    nonce: &GcmNonce,
    tag: &AuthTag,
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut combined = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag.as_bytes());

    cipher
        .decrypt(Nonce::from_slice(nonce.as_bytes()), combined.as_slice())
        .map_err(|_| CryptoError::AuthenticationFailed)
}
