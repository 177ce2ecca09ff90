//! # Content-Addressed Store Service
//!
//! Validation and limits in front of a `BlobStore` backend.
//!
//! Order of checks on `put`: namespace, then size, then the backend write.
//! On `get`: namespace, then identifier, then the backend read. A rejected
//! key never reaches the backend.

use crate::domain::config::StoreConfig;
use crate::domain::errors::ArtifactStoreError;
use crate::domain::keys::{new_identifier, validate_identifier, validate_namespace};
use crate::ports::outbound::{BlobStore, BlobStoreError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Attempts at drawing a fresh identifier before giving up.
const MAX_IDENTIFIER_ATTEMPTS: usize = 3;

/// Where an artifact was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    /// Lowercase batch namespace.
    pub namespace: String,
    /// Generated identifier, `<uuid>.json`.
    pub identifier: String,
}

/// Write-once store keyed by `(namespace, identifier)`.
#[derive(Clone)]
pub struct ContentAddressedStore {
    backend: Arc<dyn BlobStore>,
    config: StoreConfig,
}

impl ContentAddressedStore {
    /// Wrap `backend` with the given limits.
    pub fn new(backend: Arc<dyn BlobStore>, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    /// Configured artifact ceiling in bytes.
    pub fn max_artifact_bytes(&self) -> usize {
        self.config.max_artifact_bytes
    }

    /// Check `size` against the ceiling without writing.
    pub fn check_size(&self, size: usize) -> Result<(), ArtifactStoreError> {
        if size > self.config.max_artifact_bytes {
            return Err(ArtifactStoreError::PayloadTooLarge {
                size,
                max: self.config.max_artifact_bytes,
            });
        }
        Ok(())
    }

    /// Store `bytes` under a fresh identifier.
    pub async fn put(
        &self,
        namespace: &str,
        bytes: &[u8],
    ) -> Result<ArtifactLocation, ArtifactStoreError> {
        let namespace = validate_namespace(namespace)?;
        self.check_size(bytes.len())?;

        for _ in 0..MAX_IDENTIFIER_ATTEMPTS {
            let identifier = new_identifier();
            match self.backend.put_new(&namespace, &identifier, bytes).await {
                Ok(()) => {
                    info!(
                        namespace = %namespace,
                        identifier = %identifier,
                        size = bytes.len(),
                        "[ta-03] artifact stored"
                    );
                    return Ok(ArtifactLocation {
                        namespace,
                        identifier,
                    });
                }
                Err(BlobStoreError::AlreadyExists) => {
                    warn!("[ta-03] identifier collision, drawing a new one");
                }
                Err(e) => return Err(backend_error(e, &namespace, &identifier)),
            }
        }
        Err(ArtifactStoreError::IdentifierExhausted)
    }

    /// Fetch the raw artifact bytes.
    pub async fn get(
        &self,
        namespace: &str,
        identifier: &str,
    ) -> Result<Vec<u8>, ArtifactStoreError> {
        let namespace = validate_namespace(namespace)?;
        validate_identifier(identifier)?;

        let bytes = self
            .backend
            .get(&namespace, identifier)
            .await
            .map_err(|e| backend_error(e, &namespace, identifier))?;
        debug!("[ta-03] read {}/{} ({} bytes)", namespace, identifier, bytes.len());
        Ok(bytes)
    }

    /// Identifiers stored for a batch.
    pub async fn list(&self, namespace: &str) -> Result<Vec<String>, ArtifactStoreError> {
        let namespace = validate_namespace(namespace)?;
        let mut identifiers = self
            .backend
            .list(&namespace)
            .await
            .map_err(|e| backend_error(e, &namespace, ""))?;
        identifiers.retain(|id| validate_identifier(id).is_ok());
        Ok(identifiers)
    }
}

fn backend_error(e: BlobStoreError, namespace: &str, identifier: &str) -> ArtifactStoreError {
    match e {
        BlobStoreError::NotFound => ArtifactStoreError::NotFound {
            namespace: namespace.to_string(),
            identifier: identifier.to_string(),
        },
        BlobStoreError::AlreadyExists => ArtifactStoreError::IdentifierExhausted,
        BlobStoreError::Io { reason } => ArtifactStoreError::Io { reason },
    }
}
