//! # Shared Fixtures
//!
//! A `Harness` wires an `EventPipeline` to an in-memory ledger and one of the
//! two blob backends, and signs requests the way a participant's wallet does.

use async_trait::async_trait;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{EventPayload, FixedTimeSource, Role};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ta_02_signature_verification::test_helpers::sign_payload;
use ta_03_artifact_storage::{BlobStore, BlobStoreError, FileSystemBlobStore, InMemoryBlobStore};
use ta_05_event_pipeline::{
    EventPipeline, InMemoryLedger, PipelineConfig, PipelineContext, PipelineDependencies,
    WriteRequest,
};
use tempfile::TempDir;

/// Clock used by every harness: 2024-11-14T16:00:00Z.
pub const HARNESS_NOW: u64 = 1_731_600_000;

/// Which blob backend a harness runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    FileSystem,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Memory, Backend::FileSystem];
}

enum Blobs {
    Memory(Arc<InMemoryBlobStore>),
    FileSystem(Arc<FileSystemBlobStore>, TempDir),
}

/// Pipeline plus handles on its collaborators.
pub struct Harness {
    pub pipeline: EventPipeline,
    pub ledger: Arc<InMemoryLedger>,
    pub calls: Arc<CountingBlobStore>,
    config: PipelineConfig,
    blobs: Blobs,
}

impl Harness {
    pub fn new(backend: Backend, config: PipelineConfig) -> Self {
        let blobs = match backend {
            Backend::Memory => Blobs::Memory(Arc::new(InMemoryBlobStore::new())),
            Backend::FileSystem => {
                let dir = TempDir::new().expect("temp dir");
                Blobs::FileSystem(Arc::new(FileSystemBlobStore::new(dir.path())), dir)
            }
        };
        let inner: Arc<dyn BlobStore> = match &blobs {
            Blobs::Memory(store) => store.clone() as Arc<dyn BlobStore>,
            Blobs::FileSystem(store, _) => store.clone() as Arc<dyn BlobStore>,
        };
        let calls = Arc::new(CountingBlobStore::new(inner));
        let ledger = Arc::new(InMemoryLedger::new());
        let pipeline = build(&config, calls.clone(), ledger.clone());

        Self {
            pipeline,
            ledger,
            calls,
            config,
            blobs,
        }
    }

    pub fn memory() -> Self {
        Self::new(Backend::Memory, PipelineConfig::default())
    }

    /// A second pipeline over the same blobs and ledger with a fresh
    /// tracker, as after a process restart.
    pub fn restarted(&self, config: PipelineConfig) -> EventPipeline {
        build(&config, self.calls.clone(), self.ledger.clone())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fresh keypair registered on the ledger with `role`.
    pub fn participant(&self, role: Role) -> Secp256k1KeyPair {
        let keypair = Secp256k1KeyPair::generate();
        self.ledger.assign_role(keypair.address(), role);
        keypair
    }

    /// `payload` signed by `keypair`, claiming `keypair` as signer.
    pub fn signed(&self, keypair: &Secp256k1KeyPair, payload: EventPayload) -> WriteRequest {
        let signature = sign_payload(keypair, &self.config.domain, &payload);
        WriteRequest::new(payload, signature, keypair.address())
    }

    /// Replace stored bytes behind the store's back.
    pub fn overwrite(&self, namespace: &str, identifier: &str, bytes: Vec<u8>) {
        match &self.blobs {
            Blobs::Memory(store) => assert!(store.tamper(namespace, identifier, bytes)),
            Blobs::FileSystem(store, _) => {
                std::fs::write(store.root().join(namespace).join(identifier), bytes)
                    .expect("overwrite artifact file");
            }
        }
    }
}

fn build(
    config: &PipelineConfig,
    blobs: Arc<CountingBlobStore>,
    ledger: Arc<InMemoryLedger>,
) -> EventPipeline {
    let deps = PipelineDependencies::new(blobs, ledger)
        .with_time_source(Arc::new(FixedTimeSource::new(HARNESS_NOW)));
    EventPipeline::new(Arc::new(PipelineContext::new(config.clone(), deps)))
}

/// Forwards to a backend and counts every call that reaches it.
pub struct CountingBlobStore {
    inner: Arc<dyn BlobStore>,
    calls: AtomicUsize,
}

impl CountingBlobStore {
    pub fn new(inner: Arc<dyn BlobStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Write directly to the backend, bypassing validation and the size check.
    pub async fn raw_put(
        &self,
        namespace: &str,
        identifier: &str,
        bytes: &[u8],
    ) -> Result<(), BlobStoreError> {
        self.inner.put_new(namespace, identifier, bytes).await
    }

    pub async fn raw_get(&self, namespace: &str, identifier: &str) -> Result<Vec<u8>, BlobStoreError> {
        self.inner.get(namespace, identifier).await
    }
}

#[async_trait]
impl BlobStore for CountingBlobStore {
    async fn put_new(
        &self,
        namespace: &str,
        identifier: &str,
        bytes: &[u8],
    ) -> Result<(), BlobStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.put_new(namespace, identifier, bytes).await
    }

    async fn get(&self, namespace: &str, identifier: &str) -> Result<Vec<u8>, BlobStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(namespace, identifier).await
    }

    async fn list(&self, namespace: &str) -> Result<Vec<String>, BlobStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list(namespace).await
    }
}
