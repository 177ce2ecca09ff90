//! # EIP-712 Typed Data
//!
//! ```text
//! EIP712Domain(string name,string version,uint256 chainId)
//! EventPayload(bytes32 batchId,string eventType,string data)
//!
//! digest = keccak256(0x19 0x01 || domainSeparator || structHash)
//! ```
//!
//! Dynamic `string` members are encoded as the keccak256 of their UTF-8
//! bytes; `bytes32` and `uint256` as their 32-byte big-endian words.

use super::entities::{EventMessage, TypedDataDomain};
use shared_crypto::keccak256;
use shared_types::Hash;

/// Type string of the signing domain.
pub const DOMAIN_TYPE: &str = "EIP712Domain(string name,string version,uint256 chainId)";

/// Type string of the signed event.
pub const EVENT_TYPE: &str = "EventPayload(bytes32 batchId,string eventType,string data)";

/// `keccak256(DOMAIN_TYPE)`.
pub fn domain_type_hash() -> Hash {
    keccak256(DOMAIN_TYPE.as_bytes())
}

/// `keccak256(EVENT_TYPE)`.
pub fn event_type_hash() -> Hash {
    keccak256(EVENT_TYPE.as_bytes())
}

fn uint256(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn encode_words(words: &[&[u8; 32]]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(words.len() * 32);
    for word in words {
        buf.extend_from_slice(&word[..]);
    }
    buf
}

/// Hash of the encoded domain.
pub fn domain_separator(domain: &TypedDataDomain) -> Hash {
    keccak256(&encode_words(&[
        &domain_type_hash(),
        &keccak256(domain.name.as_bytes()),
        &keccak256(domain.version.as_bytes()),
        &uint256(domain.chain_id),
    ]))
}

/// Hash of the encoded event message.
pub fn struct_hash(message: &EventMessage) -> Hash {
    keccak256(&encode_words(&[
        &event_type_hash(),
        message.batch_id.as_bytes(),
        &keccak256(message.event_type.as_bytes()),
        &keccak256(message.data.as_bytes()),
    ]))
}

/// The digest a wallet signs for `message` under `domain`.
pub fn typed_data_digest(domain: &TypedDataDomain, message: &EventMessage) -> Hash {
    let mut preimage = Vec::with_capacity(66);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(&domain_separator(domain));
    preimage.extend_from_slice(&struct_hash(message));
    keccak256(&preimage)
}
