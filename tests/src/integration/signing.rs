//! # Signing and Authorization
//!
//! The signature covers the canonical `data` string; authorization is
//! checked after, and independently of, signer recovery.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{EventType, Role};
    use ta_01_commitment::{canonicalize, commit, generate_salt, CanonicalValue};
    use ta_02_signature_verification::test_helpers::{sample_payload, sign_payload};
    use ta_02_signature_verification::{
        typed_data_digest, EventMessage, SignatureVerificationApi, SignatureVerificationService,
        TypedDataDomain,
    };
    use ta_05_event_pipeline::{PipelineError, WriteRequest};

    #[test]
    fn test_key_order_does_not_change_commitment() {
        let a = CanonicalValue::map([
            ("ts", CanonicalValue::int(1_731_599_999)),
            ("temperature", CanonicalValue::float(4.5)),
            (
                "gps",
                CanonicalValue::map([
                    ("lon", CanonicalValue::float(-3.7)),
                    ("lat", CanonicalValue::float(40.4)),
                ]),
            ),
        ]);
        let b = CanonicalValue::map([
            (
                "gps",
                CanonicalValue::map([
                    ("lat", CanonicalValue::float(40.4)),
                    ("lon", CanonicalValue::float(-3.7)),
                ]),
            ),
            ("temperature", CanonicalValue::float(4.5)),
            ("ts", CanonicalValue::int(1_731_599_999)),
        ]);
        assert_eq!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());

        let salt = generate_salt();
        assert_eq!(
            commit(&a, &salt).unwrap().commitment,
            commit(&b, &salt).unwrap().commitment
        );
    }

    #[test]
    fn test_reference_digest() {
        let message = EventMessage::from_payload(&sample_payload()).unwrap();
        assert_eq!(message.data, r#"{"temperature":4.5,"ts":1731599999}"#);
        assert_eq!(
            hex_digest(typed_data_digest(&TypedDataDomain::default(), &message)),
            "49c89778b948e430d8900ad38202a07a8bdad25a9b573afa08b4600e33e7b8cb"
        );
    }

    #[test]
    fn test_flipped_data_byte_changes_recovered_signer() {
        let service = SignatureVerificationService::default();
        let keypair = Secp256k1KeyPair::generate();
        let payload = sample_payload();
        let signature = sign_payload(&keypair, service.domain(), &payload);

        let mut message = EventMessage::from_payload(&payload).unwrap();
        assert_eq!(service.recover(&message, &signature).unwrap(), keypair.address());

        message.data = message.data.replace("4.5", "4.6");
        if let Ok(recovered) = service.recover(&message, &signature) {
            assert_ne!(recovered, keypair.address());
        }
    }

    #[tokio::test]
    async fn test_valid_signature_from_wrong_role_is_denied() {
        let h = Harness::memory();
        let regulator = h.participant(Role::Regulator);

        let err = h
            .pipeline
            .write(&h.signed(&regulator, sample_payload()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::RoleDenied {
                role: Role::Regulator,
                event_type: EventType::Transport,
                ..
            }
        ));
        assert_eq!(h.calls.count(), 0);
    }

    #[tokio::test]
    async fn test_allowed_role_with_bad_signature_is_denied() {
        let h = Harness::memory();
        let transporter = h.participant(Role::Transporter);

        // Signed over a different reading than the one submitted.
        let mut signed_payload = sample_payload();
        signed_payload
            .data
            .insert("temperature".into(), 8.0.into());
        let signature = sign_payload(&transporter, &h.config().domain, &signed_payload);
        let request = WriteRequest::new(sample_payload(), signature, transporter.address());

        assert!(matches!(
            h.pipeline.write(&request).await,
            Err(PipelineError::SignatureMismatch { .. }) | Err(PipelineError::InvalidSignature(_))
        ));
        assert_eq!(h.calls.count(), 0);
    }

    #[tokio::test]
    async fn test_signature_for_another_chain_is_rejected() {
        let h = Harness::memory();
        let transporter = h.participant(Role::Transporter);
        let mainnet = TypedDataDomain::new("FoodTrace", "1", 1);
        let payload = sample_payload();
        let signature = sign_payload(&transporter, &mainnet, &payload);

        let err = h
            .pipeline
            .write(&WriteRequest::new(payload, signature, transporter.address()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SignatureMismatch { .. } | PipelineError::InvalidSignature(_)
        ));
    }

    #[tokio::test]
    async fn test_unregistered_signer_is_denied() {
        let h = Harness::memory();
        let stranger = Secp256k1KeyPair::generate();
        for event_type in EventType::ALL {
            let mut payload = sample_payload();
            payload.event_type = event_type;
            assert!(matches!(
                h.pipeline.write(&h.signed(&stranger, payload)).await,
                Err(PipelineError::RoleDenied {
                    role: Role::Unregistered,
                    ..
                })
            ));
        }
    }

    fn hex_digest(digest: [u8; 32]) -> String {
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}
