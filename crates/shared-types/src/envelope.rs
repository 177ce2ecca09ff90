//! # Event Envelope and Stored Artifact
//!
//! The `EventEnvelope` is created once per write and is immutable afterwards.
//! The `StoredArtifact` is the exact JSON document persisted by the
//! content-addressed store.
//!
//! ## Invariants
//!
//! - `envelope.commitment == SHA-256(canonical_bytes(payload) || salt)`, always
//!   over canonical bytes, never over ciphertext.
//! - `StoredArtifact::Encrypted` ⇔ `envelope.encryption.is_some()`.

use crate::entities::{Address, AuthTag, Commitment, EventPayload, GcmNonce, HexBytes, Salt};
use crate::errors::TypeError;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Authenticated cipher used for the artifact body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    /// AES-256 in Galois/Counter Mode, 96-bit nonce, 128-bit tag.
    #[serde(rename = "AES-256-GCM")]
    Aes256Gcm,
}

/// Encryption metadata recorded next to the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionMeta {
    /// Cipher tag.
    #[serde(rename = "alg")]
    pub algorithm: EncryptionAlgorithm,
    /// Fresh per-write nonce.
    #[serde(rename = "iv")]
    pub nonce: GcmNonce,
    /// Authentication tag.
    pub tag: AuthTag,
}

/// Signed, committed event as persisted off-ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// The logical payload (canonicalized before hashing).
    pub payload: EventPayload,
    /// Participant address recovered from `signature`.
    pub signer: Address,
    /// 65-byte typed-data signature (`r || s || v`).
    pub signature: HexBytes,
    /// 32 random bytes; stored here, never on the ledger.
    pub salt: Salt,
    /// `SHA-256(canonical || salt)`.
    pub commitment: Commitment,
    /// Present only in encrypted mode. Absence means plaintext mode.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "enc")]
    pub encryption: Option<EncryptionMeta>,
    /// Unix seconds at write time.
    pub created_at: Timestamp,
}

/// Bytes actually written to the content-addressed store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StoredArtifact {
    /// Canonical bytes stored in the clear.
    Plaintext {
        envelope: EventEnvelope,
        /// Canonical JSON text of the payload.
        canonical: String,
    },
    /// Canonical bytes sealed with the pipeline key.
    Encrypted {
        envelope: EventEnvelope,
        /// AES-256-GCM ciphertext without the tag.
        ciphertext: HexBytes,
    },
}

impl StoredArtifact {
    /// The envelope, whatever the mode.
    pub fn envelope(&self) -> &EventEnvelope {
        match self {
            StoredArtifact::Plaintext { envelope, .. } => envelope,
            StoredArtifact::Encrypted { envelope, .. } => envelope,
        }
    }

    /// True in encrypted mode.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, StoredArtifact::Encrypted { .. })
    }

    /// Check that the mode agrees with the envelope metadata.
    pub fn check_consistency(&self) -> Result<(), TypeError> {
        match self {
            StoredArtifact::Plaintext { envelope, .. } if envelope.encryption.is_some() => Err(
                TypeError::InconsistentArtifact("plaintext artifact carries encryption metadata"),
            ),
            StoredArtifact::Encrypted { envelope, .. } if envelope.encryption.is_none() => Err(
                TypeError::InconsistentArtifact("encrypted artifact lacks encryption metadata"),
            ),
            _ => Ok(()),
        }
    }

    /// Serialize to the persisted JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        self.check_consistency()?;
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Parse persisted bytes, rejecting inconsistent artifacts.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        let artifact: StoredArtifact =
            serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))?;
        artifact.check_consistency()?;
        Ok(artifact)
    }
}
