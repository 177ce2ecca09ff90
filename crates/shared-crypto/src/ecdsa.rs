//! # ECDSA Signing (secp256k1)
//!
//! Wallet-side signing used by the operator tooling and the test suites.
//! Verification and recovery live in `ta-02-signature-verification`.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization (EIP-2)
//! - Secret scalar is zeroized on drop by `k256`

use crate::hashing::keccak256;
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, SigningKey};
use shared_types::{Address, Hash};

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Ethereum-style address: last 20 bytes of keccak256(uncompressed pubkey).
    pub fn address(&self) -> Address {
        let encoded = self.signing_key.verifying_key().to_encoded_point(false);
        let hash = keccak256(&encoded.as_bytes()[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        Address(address)
    }

    /// Sign a 32-byte digest, returning 65 bytes `r || s || v` with `v ∈ {27, 28}`.
    pub fn sign_prehash(&self, digest: &Hash) -> Result<[u8; 65], CryptoError> {
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| CryptoError::SigningFailed)?;

        // k256 already emits low-S; normalize anyway and keep v consistent.
        let (sig, recid) = match sig.normalize_s() {
            Some(low) => (
                low,
                RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced()),
            ),
            None => (sig, recid),
        };

        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&sig.to_bytes());
        out[64] = recid.to_byte() + 27;
        Ok(out)
    }
}
