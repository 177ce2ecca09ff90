//! # Outbound Ports (Driven Ports / SPI)
//!
//! Blob backends only ever receive keys that already passed validation.

use async_trait::async_trait;
use thiserror::Error;

/// Error from a blob backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlobStoreError {
    /// No blob under this key.
    #[error("Blob not found")]
    NotFound,

    /// A blob already exists under this key.
    #[error("Blob already exists")]
    AlreadyExists,

    /// Backend failure; `reason` must not contain paths or secrets.
    #[error("Backend I/O error: {reason}")]
    Io { reason: String },
}

/// Write-once blob key/value interface.
///
/// Keys are `(namespace, identifier)` pairs. Implementations must never
/// overwrite an existing pair.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes`, failing with `AlreadyExists` if the pair is taken.
    async fn put_new(
        &self,
        namespace: &str,
        identifier: &str,
        bytes: &[u8],
    ) -> Result<(), BlobStoreError>;

    /// Fetch the blob stored under the pair.
    async fn get(&self, namespace: &str, identifier: &str) -> Result<Vec<u8>, BlobStoreError>;

    /// Identifiers stored under `namespace`, sorted. Empty if none.
    async fn list(&self, namespace: &str) -> Result<Vec<String>, BlobStoreError>;
}
