//! # Write → Verify Flows
//!
//! Every scenario runs on both blob backends.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Backend, Harness};
    use shared_crypto::SecretKey;
    use shared_types::{BatchId, EventType, Role, StoredArtifact};
    use std::collections::HashSet;
    use ta_01_commitment::commit_payload;
    use ta_02_signature_verification::test_helpers::sample_payload;
    use ta_04_reconciliation::ReconciliationStatus;
    use ta_05_event_pipeline::{PipelineConfig, PipelineError};

    #[tokio::test]
    async fn test_transport_event_end_to_end() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());
            let transporter = h.participant(Role::Transporter);

            let receipt = h
                .pipeline
                .write(&h.signed(&transporter, sample_payload()))
                .await
                .unwrap();
            assert_eq!(receipt.namespace, BatchId([0x11; 32]).namespace());
            assert_eq!(receipt.status, ReconciliationStatus::Pending);

            let report = h
                .pipeline
                .verify(&receipt.namespace, &receipt.identifier)
                .await
                .unwrap();
            assert!(report.matches, "{backend:?}");
            assert_eq!(report.recomputed, receipt.commitment);

            let artifact = h
                .pipeline
                .read_artifact(&receipt.namespace, &receipt.identifier)
                .await
                .unwrap();
            assert_eq!(artifact.envelope().signer, transporter.address());
            assert!(!artifact.is_encrypted());
        }
    }

    #[tokio::test]
    async fn test_receipt_commitment_reproducible_from_salt() {
        let h = Harness::memory();
        let producer = h.participant(Role::Producer);
        let payload = sample_payload();

        let receipt = h
            .pipeline
            .write(&h.signed(&producer, payload.clone()))
            .await
            .unwrap();

        // An independent verifier holding the payload and the salt.
        let recomputed = commit_payload(&payload, &receipt.salt).unwrap();
        assert_eq!(recomputed.commitment, receipt.commitment);
    }

    #[tokio::test]
    async fn test_wrong_key_persists_nothing() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());
            let transporter = h.participant(Role::Transporter);
            let impostor = h.participant(Role::Transporter);

            let mut request = h.signed(&impostor, sample_payload());
            request.claimed_signer = transporter.address();

            let err = h.pipeline.write(&request).await.unwrap_err();
            assert!(matches!(err, PipelineError::SignatureMismatch { .. }));
            assert!(err.is_client_fault());
            assert_eq!(h.calls.count(), 0, "{backend:?}");
            assert!(h.pipeline.pending_entries().is_empty());
        }
    }

    #[tokio::test]
    async fn test_oversized_payload_persists_nothing() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());
            let transporter = h.participant(Role::Transporter);
            let mut payload = sample_payload();
            payload
                .data
                .insert("notes".into(), "x".repeat(300 * 1024).into());

            let err = h
                .pipeline
                .write(&h.signed(&transporter, payload))
                .await
                .unwrap_err();
            let PipelineError::PayloadTooLarge { size, max } = err else {
                panic!("expected PayloadTooLarge, got {err:?}");
            };
            assert_eq!(max, 256 * 1024);
            assert!(size > max);
            assert_eq!(h.calls.count(), 0, "{backend:?}");
        }
    }

    #[tokio::test]
    async fn test_configured_ceiling() {
        let h = Harness::new(
            Backend::Memory,
            PipelineConfig::default().with_max_artifact_bytes(64),
        );
        let transporter = h.participant(Role::Transporter);
        assert!(matches!(
            h.pipeline
                .write(&h.signed(&transporter, sample_payload()))
                .await,
            Err(PipelineError::PayloadTooLarge { max: 64, .. })
        ));
    }

    #[tokio::test]
    async fn test_encrypted_mode_end_to_end() {
        for backend in Backend::ALL {
            let config = PipelineConfig::default().with_encryption_key(SecretKey::generate());
            let h = Harness::new(backend, config);
            let transporter = h.participant(Role::Transporter);

            let receipt = h
                .pipeline
                .write(&h.signed(&transporter, sample_payload()))
                .await
                .unwrap();
            assert!(receipt.encrypted);

            let artifact = h
                .pipeline
                .read_artifact(&receipt.namespace, &receipt.identifier)
                .await
                .unwrap();
            let StoredArtifact::Encrypted { envelope, .. } = &artifact else {
                panic!("expected an encrypted artifact");
            };
            assert!(envelope.encryption.is_some());

            let report = h
                .pipeline
                .verify(&receipt.namespace, &receipt.identifier)
                .await
                .unwrap();
            assert!(report.matches);
            assert!(report.ciphertext_checked);

            let plaintext = h
                .pipeline
                .recover_plaintext(&receipt.namespace, &receipt.identifier)
                .await
                .unwrap();
            let expected = commit_payload(&sample_payload(), &receipt.salt).unwrap();
            assert_eq!(plaintext, expected.canonical);
        }
    }

    #[tokio::test]
    async fn test_plaintext_mode_has_no_enc_field() {
        let h = Harness::memory();
        let transporter = h.participant(Role::Transporter);
        let receipt = h
            .pipeline
            .write(&h.signed(&transporter, sample_payload()))
            .await
            .unwrap();

        let raw = h
            .calls
            .raw_get(&receipt.namespace, &receipt.identifier)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["mode"], "plaintext");
        assert!(json["envelope"].get("enc").is_none());
        assert_eq!(json["envelope"]["createdAt"], crate::fixtures::HARNESS_NOW);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_same_batch() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());
            let retailer = h.participant(Role::Retailer);

            let mut tasks = Vec::new();
            for i in 0..16u64 {
                let pipeline = h.pipeline.clone();
                let mut payload = sample_payload();
                payload.event_type = EventType::Temperature;
                payload.data.insert("seq".into(), i.into());
                let request = h.signed(&retailer, payload);
                tasks.push(tokio::spawn(async move { pipeline.write(&request).await }));
            }

            let mut identifiers = HashSet::new();
            for task in tasks {
                let receipt = task.await.unwrap().unwrap();
                assert!(identifiers.insert(receipt.identifier));
            }

            let listed = h
                .pipeline
                .list(&BatchId([0x11; 32]).namespace())
                .await
                .unwrap();
            assert_eq!(listed.len(), 16, "{backend:?}");
            assert_eq!(h.pipeline.pending_entries().len(), 16);
        }
    }

    #[tokio::test]
    async fn test_uppercase_namespace_reads_same_artifact() {
        let h = Harness::memory();
        let transporter = h.participant(Role::Transporter);
        let mut payload = sample_payload();
        payload.batch_id = BatchId([0xAB; 32]);
        let receipt = h
            .pipeline
            .write(&h.signed(&transporter, payload))
            .await
            .unwrap();

        let upper = format!("0x{}", receipt.namespace[2..].to_uppercase());
        let report = h.pipeline.verify(&upper, &receipt.identifier).await.unwrap();
        assert!(report.matches);
        assert_eq!(report.namespace, receipt.namespace);
    }
}
