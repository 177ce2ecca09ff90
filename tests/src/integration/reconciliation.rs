//! # Anchoring and Reconciliation
//!
//! Ledger outcomes flow into the tracker; an artifact is never discarded
//! because anchoring failed.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Backend, Harness};
    use async_trait::async_trait;
    use shared_types::{Address, BatchId, Commitment, EventType, Role};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use ta_02_signature_verification::test_helpers::sample_payload;
    use ta_03_artifact_storage::InMemoryBlobStore;
    use ta_04_reconciliation::ReconciliationStatus;
    use ta_05_event_pipeline::{
        EventPipeline, InMemoryLedger, LedgerError, LedgerGateway, PipelineConfig,
        PipelineContext, PipelineDependencies, PipelineError,
    };

    /// Grants roles normally but can refuse anchoring on demand.
    struct FlakyAnchorLedger {
        inner: InMemoryLedger,
        refuse_anchoring: AtomicBool,
    }

    #[async_trait]
    impl LedgerGateway for FlakyAnchorLedger {
        async fn role_of(&self, address: &Address) -> Result<u8, LedgerError> {
            self.inner.role_of(address).await
        }

        async fn anchor_commitment(
            &self,
            batch_id: &BatchId,
            commitment: &Commitment,
            event_type: EventType,
        ) -> Result<String, LedgerError> {
            if self.refuse_anchoring.load(Ordering::SeqCst) {
                return Err(LedgerError::Unavailable {
                    reason: "rpc timeout".into(),
                });
            }
            self.inner
                .anchor_commitment(batch_id, commitment, event_type)
                .await
        }

        async fn anchored_commitments(
            &self,
            batch_id: &BatchId,
        ) -> Result<Vec<Commitment>, LedgerError> {
            self.inner.anchored_commitments(batch_id).await
        }
    }

    #[tokio::test]
    async fn test_write_and_anchor_confirms() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());
            let producer = h.participant(Role::Producer);
            let mut payload = sample_payload();
            payload.event_type = EventType::Create;

            let receipt = h
                .pipeline
                .write_and_anchor(&h.signed(&producer, payload))
                .await
                .unwrap();
            assert_eq!(receipt.status, ReconciliationStatus::Confirmed);

            let anchors = h.ledger.anchors(&BatchId([0x11; 32]));
            assert_eq!(anchors.len(), 1);
            assert_eq!(anchors[0].event_type, EventType::Create);
            assert_eq!(
                Some(anchors[0].reference.clone()),
                receipt.external_reference
            );

            let verified = h
                .pipeline
                .verify_anchored(&receipt.namespace, &receipt.identifier)
                .await
                .unwrap();
            assert!(verified.report.matches && verified.anchored, "{backend:?}");
        }
    }

    #[tokio::test]
    async fn test_unanchored_write_is_not_reported_anchored() {
        let h = Harness::memory();
        let transporter = h.participant(Role::Transporter);
        let receipt = h
            .pipeline
            .write(&h.signed(&transporter, sample_payload()))
            .await
            .unwrap();

        let verified = h
            .pipeline
            .verify_anchored(&receipt.namespace, &receipt.identifier)
            .await
            .unwrap();
        assert!(verified.report.matches);
        assert!(!verified.anchored);
    }

    #[tokio::test]
    async fn test_anchor_failure_keeps_artifact_pending() {
        let inner = InMemoryLedger::new();
        let transporter = shared_crypto::Secp256k1KeyPair::generate();
        inner.assign_role(transporter.address(), Role::Transporter);
        let ledger = Arc::new(FlakyAnchorLedger {
            inner,
            refuse_anchoring: AtomicBool::new(true),
        });
        let blobs = Arc::new(InMemoryBlobStore::new());
        let pipeline = EventPipeline::new(Arc::new(PipelineContext::new(
            PipelineConfig::default(),
            PipelineDependencies::new(blobs.clone(), ledger.clone()),
        )));

        let payload = sample_payload();
        let signature = ta_02_signature_verification::test_helpers::sign_payload(
            &transporter,
            &Default::default(),
            &payload,
        );
        let request =
            ta_05_event_pipeline::WriteRequest::new(payload, signature, transporter.address());

        let err = pipeline.write_and_anchor(&request).await.unwrap_err();
        assert!(err.is_retryable());
        let PipelineError::LedgerUnavailable {
            identifier: Some(identifier),
            ..
        } = err
        else {
            panic!("expected LedgerUnavailable with identifier, got {err:?}");
        };
        assert_eq!(blobs.len(), 1);

        let namespace = BatchId([0x11; 32]).namespace();
        let status = pipeline.status(&namespace, &identifier).await.unwrap();
        assert_eq!(status.status, ReconciliationStatus::Pending);
        assert!(status.tracked);
        assert!(pipeline.verify(&namespace, &identifier).await.unwrap().matches);

        // The caller gives up on this anchor and records the failure.
        let failed = pipeline
            .update_status(&identifier, ReconciliationStatus::Failed, None)
            .await
            .unwrap();
        assert_eq!(failed.status, ReconciliationStatus::Failed);

        // A retried write after the ledger recovers is a separate artifact.
        ledger.refuse_anchoring.store(false, Ordering::SeqCst);
        let receipt = pipeline.write_and_anchor(&request).await.unwrap();
        assert_ne!(receipt.identifier, identifier);
        assert_eq!(receipt.status, ReconciliationStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_duplicate_confirmations_are_idempotent() {
        let h = Harness::memory();
        let transporter = h.participant(Role::Transporter);
        let receipt = h
            .pipeline
            .write(&h.signed(&transporter, sample_payload()))
            .await
            .unwrap();
        let id = receipt.identifier.as_str();

        for _ in 0..2 {
            let report = h
                .pipeline
                .update_status(id, ReconciliationStatus::Confirmed, Some("0xfeed".into()))
                .await
                .unwrap();
            assert_eq!(report.status, ReconciliationStatus::Confirmed);
        }
        let report = h
            .pipeline
            .update_status(id, ReconciliationStatus::Failed, Some("0xdead".into()))
            .await
            .unwrap();
        assert_eq!(report.status, ReconciliationStatus::Confirmed);
        assert_eq!(report.external_reference.as_deref(), Some("0xfeed"));

        let status = h.pipeline.status(&receipt.namespace, id).await.unwrap();
        assert_eq!(status.status, ReconciliationStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_orphan_after_restart_reads_as_pending() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());
            let transporter = h.participant(Role::Transporter);
            let receipt = h
                .pipeline
                .write(&h.signed(&transporter, sample_payload()))
                .await
                .unwrap();

            let restarted = h.restarted(h.config().clone());
            let status = restarted
                .status(&receipt.namespace, &receipt.identifier)
                .await
                .unwrap();
            assert_eq!(status.status, ReconciliationStatus::Pending);
            assert_eq!(status.external_reference, None);
            assert!(!status.tracked, "{backend:?}");

            // Adopted orphans can then be resolved like any other entry.
            restarted
                .update_status(
                    &receipt.identifier,
                    ReconciliationStatus::Confirmed,
                    Some("0x01".into()),
                )
                .await
                .unwrap();
            assert!(restarted.pending_entries().is_empty());
        }
    }

    #[tokio::test]
    async fn test_status_of_unknown_artifact() {
        let h = Harness::memory();
        let namespace = BatchId([0x11; 32]).namespace();
        assert!(matches!(
            h.pipeline.status(&namespace, "never-written.json").await,
            Err(PipelineError::ArtifactNotFound { .. })
        ));
        assert!(matches!(
            h.pipeline
                .update_status("never-written.json", ReconciliationStatus::Confirmed, None)
                .await,
            Err(PipelineError::EntryNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_pending_entries_listed_oldest_first() {
        let h = Harness::memory();
        let transporter = h.participant(Role::Transporter);
        let mut identifiers = Vec::new();
        for _ in 0..3 {
            let receipt = h
                .pipeline
                .write(&h.signed(&transporter, sample_payload()))
                .await
                .unwrap();
            identifiers.push(receipt.identifier);
        }
        h.pipeline
            .update_status(&identifiers[1], ReconciliationStatus::Confirmed, None)
            .await
            .unwrap();

        let mut expected = vec![identifiers[0].clone(), identifiers[2].clone()];
        expected.sort();
        let pending: Vec<String> = h
            .pipeline
            .pending_entries()
            .into_iter()
            .map(|entry| entry.identifier)
            .collect();
        assert_eq!(pending, expected);
    }
}
