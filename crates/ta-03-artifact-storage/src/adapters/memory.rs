use crate::ports::outbound::{BlobStore, BlobStoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-memory blob store.
///
/// Ordered by `(namespace, identifier)` so `list` is a range scan.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<BTreeMap<(String, String), Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs across all namespaces.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// Replace a stored blob in place, bypassing write-once.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn tamper(&self, namespace: &str, identifier: &str, bytes: Vec<u8>) -> bool {
        match self
            .blobs
            .write()
            .get_mut(&(namespace.to_string(), identifier.to_string()))
        {
            Some(slot) => {
                *slot = bytes;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put_new(
        &self,
        namespace: &str,
        identifier: &str,
        bytes: &[u8],
    ) -> Result<(), BlobStoreError> {
        let mut blobs = self.blobs.write();
        let key = (namespace.to_string(), identifier.to_string());
        if blobs.contains_key(&key) {
            return Err(BlobStoreError::AlreadyExists);
        }
        blobs.insert(key, bytes.to_vec());
        Ok(())
    }

    async fn get(&self, namespace: &str, identifier: &str) -> Result<Vec<u8>, BlobStoreError> {
        self.blobs
            .read()
            .get(&(namespace.to_string(), identifier.to_string()))
            .cloned()
            .ok_or(BlobStoreError::NotFound)
    }

    async fn list(&self, namespace: &str) -> Result<Vec<String>, BlobStoreError> {
        Ok(self
            .blobs
            .read()
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, id)| id.clone())
            .collect())
    }
}
