//! # Encryption Envelope
//!
//! Plaintext mode is explicit: an artifact written without a key carries no
//! `enc` field at all, so it can never be mistaken for encrypted data.

use shared_crypto::{open, seal, CryptoError, SecretKey};
use shared_types::{EncryptionAlgorithm, EncryptionMeta};

/// Whether artifact bodies are sealed, and with which key.
#[derive(Debug, Clone, Default)]
pub enum EncryptionMode {
    /// Canonical bytes stored in the clear.
    #[default]
    Disabled,
    /// Canonical bytes sealed with AES-256-GCM, fresh nonce per write.
    Aes256Gcm(SecretKey),
}

impl EncryptionMode {
    /// `Aes256Gcm` when a key is configured, `Disabled` otherwise.
    pub fn from_key(key: Option<SecretKey>) -> Self {
        match key {
            Some(key) => Self::Aes256Gcm(key),
            None => Self::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Aes256Gcm(_))
    }

    /// Seal `canonical`. `None` in plaintext mode.
    pub fn seal(&self, canonical: &[u8]) -> Result<Option<(EncryptionMeta, Vec<u8>)>, CryptoError> {
        let Self::Aes256Gcm(key) = self else {
            return Ok(None);
        };
        let sealed = seal(key, canonical)?;
        let meta = EncryptionMeta {
            algorithm: EncryptionAlgorithm::Aes256Gcm,
            nonce: sealed.nonce,
            tag: sealed.tag,
        };
        Ok(Some((meta, sealed.ciphertext)))
    }

    /// Open a sealed body. `None` when no key is configured.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed` if the ciphertext, nonce or tag were altered.
    /// No partial plaintext is ever returned.
    pub fn open(
        &self,
        meta: &EncryptionMeta,
        ciphertext: &[u8],
    ) -> Option<Result<Vec<u8>, CryptoError>> {
        match self {
            Self::Aes256Gcm(key) => Some(open(key, ciphertext, &meta.nonce, &meta.tag)),
            Self::Disabled => None,
        }
    }
}
