//! # Path Traversal
//!
//! Malformed namespaces and identifiers must be refused before any backend
//! call, on every read entry point.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Backend, Harness};
    use shared_types::BatchId;
    use ta_04_reconciliation::ReconciliationStatus;
    use ta_05_event_pipeline::{PipelineConfig, PipelineError};

    const BAD_IDENTIFIERS: &[&str] = &[
        "../../etc/passwd",
        "..",
        ".",
        "",
        "a/b.json",
        "a\\b.json",
        "%2e%2e%2fpasswd",
        "x.json\0",
        "name with space.json",
    ];

    fn bad_namespaces() -> Vec<String> {
        vec![
            "../..".to_string(),
            "0x1234".to_string(),
            format!("0x{}", "g".repeat(64)),
            format!("0x{}/..", "11".repeat(32)),
            "11".repeat(32),
            format!("0x{}", "11".repeat(33)),
        ]
    }

    #[tokio::test]
    async fn test_bad_identifiers_never_reach_storage() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());
            let namespace = BatchId([0x11; 32]).namespace();

            for bad in BAD_IDENTIFIERS {
                assert_eq!(
                    h.pipeline.verify(&namespace, bad).await.unwrap_err(),
                    PipelineError::InvalidIdentifier,
                    "verify {bad:?}"
                );
                assert_eq!(
                    h.pipeline.read_artifact(&namespace, bad).await.unwrap_err(),
                    PipelineError::InvalidIdentifier
                );
                assert_eq!(
                    h.pipeline.recover_plaintext(&namespace, bad).await.unwrap_err(),
                    PipelineError::InvalidIdentifier
                );
                assert_eq!(
                    h.pipeline.status(&namespace, bad).await.unwrap_err(),
                    PipelineError::InvalidIdentifier
                );
                assert_eq!(
                    h.pipeline
                        .update_status(bad, ReconciliationStatus::Failed, None)
                        .await
                        .unwrap_err(),
                    PipelineError::InvalidIdentifier
                );
            }
            assert_eq!(h.calls.count(), 0, "{backend:?}");
        }
    }

    #[tokio::test]
    async fn test_bad_namespaces_never_reach_storage() {
        for backend in Backend::ALL {
            let h = Harness::new(backend, PipelineConfig::default());

            for bad in bad_namespaces() {
                assert_eq!(
                    h.pipeline.verify(&bad, "a.json").await.unwrap_err(),
                    PipelineError::InvalidNamespace,
                    "verify {bad:?}"
                );
                assert_eq!(
                    h.pipeline.list(&bad).await.unwrap_err(),
                    PipelineError::InvalidNamespace
                );
                assert_eq!(
                    h.pipeline.status(&bad, "a.json").await.unwrap_err(),
                    PipelineError::InvalidNamespace
                );
            }
            assert_eq!(h.calls.count(), 0, "{backend:?}");
        }
    }

    #[tokio::test]
    async fn test_overlong_identifier_rejected() {
        let h = Harness::memory();
        let namespace = BatchId([0x11; 32]).namespace();
        let long = format!("{}.json", "a".repeat(200));
        assert_eq!(
            h.pipeline.verify(&namespace, &long).await.unwrap_err(),
            PipelineError::InvalidIdentifier
        );
        assert_eq!(h.calls.count(), 0);
    }
}
