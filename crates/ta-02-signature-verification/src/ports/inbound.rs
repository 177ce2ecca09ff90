//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{EventMessage, SignerCheck, TypedDataDomain};
use crate::domain::errors::SignatureError;
use shared_types::{Address, Hash};

/// Primary Signature Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SignatureVerificationApi: Send + Sync {
    /// Signing domain this verifier is bound to.
    fn domain(&self) -> &TypedDataDomain;

    /// Typed-data digest of `message` under this verifier's domain.
    fn digest(&self, message: &EventMessage) -> Hash;

    /// Recover the address that signed `message`.
    ///
    /// # Security
    /// - Rejects signatures with high S values (EIP-2 malleability protection)
    fn recover(&self, message: &EventMessage, signature: &[u8]) -> Result<Address, SignatureError>;

    /// Recover the signer and compare it with the claimed address.
    ///
    /// A mismatch is reported in the returned `SignerCheck`, not as an error.
    fn verify_signer(
        &self,
        message: &EventMessage,
        signature: &[u8],
        claimed: Address,
    ) -> Result<SignerCheck, SignatureError>;
}
