//! # Domain Entities
//!
//! Signature layout, the typed-data domain and the signed event message.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, BatchId, EventPayload};
use ta_01_commitment::{canonicalize_to_string, CanonicalValue, CanonicalizationError};

/// Length of a serialized `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Default typed-data domain name.
pub const DEFAULT_DOMAIN_NAME: &str = "FoodTrace";

/// Default typed-data domain version.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Default chain id (Sepolia).
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse the 65-byte wallet encoding `r || s || v`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Serialize as `r || s || v`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

impl TryFrom<&[u8]> for EcdsaSignature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

// =============================================================================
// Typed Data
// =============================================================================

/// Deployment-wide signing domain: `EIP712Domain(name, version, chainId)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
}

impl Default for TypedDataDomain {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOMAIN_NAME.to_string(),
            version: DEFAULT_DOMAIN_VERSION.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

impl TypedDataDomain {
    /// Build a domain.
    pub fn new(name: impl Into<String>, version: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
        }
    }
}

/// The three fields a participant signs.
///
/// `data` is the canonical JSON text of the payload's data mapping, so the
/// wallet and the verifier hash identical bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventMessage {
    pub batch_id: BatchId,
    pub event_type: String,
    pub data: String,
}

impl EventMessage {
    /// Derive the signed message from a payload.
    pub fn from_payload(payload: &EventPayload) -> Result<Self, CanonicalizationError> {
        let data = canonicalize_to_string(&CanonicalValue::from(&payload.data))?;
        Ok(Self {
            batch_id: payload.batch_id,
            event_type: payload.event_type.as_str().to_string(),
            data,
        })
    }
}

/// Outcome of comparing a recovered signer against the claimed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignerCheck {
    /// Address recovered from the signature.
    pub recovered: Address,
    /// Address the request claimed.
    pub claimed: Address,
    /// `recovered == claimed`.
    pub matches: bool,
}
