//! # Signature Verification Service
//!
//! Application service layer that implements the `SignatureVerificationApi` trait.
//!
//! Binds the domain logic to one deployment-wide `TypedDataDomain`.

use crate::domain::ecdsa;
use crate::domain::entities::{EcdsaSignature, EventMessage, SignerCheck, TypedDataDomain};
use crate::domain::errors::SignatureError;
use crate::domain::typed_data::typed_data_digest;
use crate::ports::inbound::SignatureVerificationApi;
use shared_types::{Address, Hash};
use tracing::debug;

/// Signature Verification Service.
#[derive(Debug, Clone, Default)]
pub struct SignatureVerificationService {
    domain: TypedDataDomain,
}

impl SignatureVerificationService {
    /// Create a verifier for `domain`.
    pub fn new(domain: TypedDataDomain) -> Self {
        Self { domain }
    }
}

impl SignatureVerificationApi for SignatureVerificationService {
    fn domain(&self) -> &TypedDataDomain {
        &self.domain
    }

    fn digest(&self, message: &EventMessage) -> Hash {
        typed_data_digest(&self.domain, message)
    }

    fn recover(&self, message: &EventMessage, signature: &[u8]) -> Result<Address, SignatureError> {
        let signature = EcdsaSignature::from_slice(signature)?;
        let digest = self.digest(message);
        ecdsa::recover_address(&digest, &signature).inspect_err(|e| {
            debug!("[ta-02] signature recovery failed: {}", e);
        })
    }

    fn verify_signer(
        &self,
        message: &EventMessage,
        signature: &[u8],
        claimed: Address,
    ) -> Result<SignerCheck, SignatureError> {
        let signature = EcdsaSignature::from_slice(signature)?;
        let digest = self.digest(message);
        let check = ecdsa::check_signer(&digest, &signature, claimed)?;
        if !check.matches {
            debug!(
                recovered = %check.recovered,
                claimed = %check.claimed,
                "[ta-02] recovered signer differs from claim"
            );
        }
        Ok(check)
    }
}
