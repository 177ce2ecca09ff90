//! # Pipeline Context
//!
//! Every collaborator a pipeline call touches, constructed once and shared
//! through `Arc`. There are no process-wide handles; two contexts built from
//! different dependencies never see each other's data.

use crate::config::PipelineConfig;
use crate::domain::authorization::AuthorizationMatrix;
use crate::domain::encryption::EncryptionMode;
use crate::ports::outbound::LedgerGateway;
use shared_types::{SystemTimeSource, TimeSource};
use std::sync::Arc;
use ta_02_signature_verification::SignatureVerificationService;
use ta_03_artifact_storage::{BlobStore, ContentAddressedStore};
use ta_04_reconciliation::ReconciliationTracker;

/// External collaborators of the pipeline.
pub struct PipelineDependencies {
    pub blobs: Arc<dyn BlobStore>,
    pub ledger: Arc<dyn LedgerGateway>,
    pub time_source: Arc<dyn TimeSource>,
}

impl PipelineDependencies {
    /// Dependencies on the system clock.
    pub fn new(blobs: Arc<dyn BlobStore>, ledger: Arc<dyn LedgerGateway>) -> Self {
        Self {
            blobs,
            ledger,
            time_source: Arc::new(SystemTimeSource),
        }
    }

    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }
}

/// Wired-up pipeline state.
pub struct PipelineContext {
    pub(crate) store: ContentAddressedStore,
    pub(crate) ledger: Arc<dyn LedgerGateway>,
    pub(crate) tracker: Arc<ReconciliationTracker>,
    pub(crate) verifier: SignatureVerificationService,
    pub(crate) authorization: AuthorizationMatrix,
    pub(crate) encryption: EncryptionMode,
    pub(crate) time_source: Arc<dyn TimeSource>,
}

impl PipelineContext {
    pub fn new(config: PipelineConfig, deps: PipelineDependencies) -> Self {
        let tracker = ReconciliationTracker::new(Arc::clone(&deps.time_source));
        Self {
            store: ContentAddressedStore::new(deps.blobs, config.store),
            ledger: deps.ledger,
            tracker: Arc::new(tracker),
            verifier: SignatureVerificationService::new(config.domain),
            authorization: config.authorization,
            encryption: EncryptionMode::from_key(config.encryption_key),
            time_source: deps.time_source,
        }
    }

    /// The reconciliation tracker, shared with whoever resolves anchors.
    pub fn tracker(&self) -> &Arc<ReconciliationTracker> {
        &self.tracker
    }

    pub fn authorization(&self) -> &AuthorizationMatrix {
        &self.authorization
    }

    /// True when artifact bodies are sealed.
    pub fn encryption_enabled(&self) -> bool {
        self.encryption.is_enabled()
    }

    pub fn max_artifact_bytes(&self) -> usize {
        self.store.max_artifact_bytes()
    }
}
