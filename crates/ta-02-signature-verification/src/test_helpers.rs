//! # Test Helpers
//!
//! Wallet-side signing of event payloads, for this crate's tests and for
//! downstream suites through the `test-utils` feature.

use crate::domain::entities::{EventMessage, TypedDataDomain};
use crate::domain::typed_data::typed_data_digest;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{BatchId, DataMap, EventPayload, EventType};

/// The reference Transport event: batch `0x11..11`,
/// `{temperature: 4.5, ts: 1731599999}`.
pub fn sample_payload() -> EventPayload {
    let mut data = DataMap::new();
    data.insert("temperature".into(), 4.5.into());
    data.insert("ts".into(), 1_731_599_999u64.into());
    EventPayload::new(BatchId([0x11; 32]), EventType::Transport, data)
}

/// Sign `payload` as a wallet would, returning 65 bytes `r || s || v`.
pub fn sign_payload(
    keypair: &Secp256k1KeyPair,
    domain: &TypedDataDomain,
    payload: &EventPayload,
) -> Vec<u8> {
    let message = EventMessage::from_payload(payload).expect("payload canonicalizes");
    let digest = typed_data_digest(domain, &message);
    keypair
        .sign_prehash(&digest)
        .expect("signing succeeds")
        .to_vec()
}
