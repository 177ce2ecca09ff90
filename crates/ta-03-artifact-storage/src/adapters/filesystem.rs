use crate::ports::outbound::{BlobStore, BlobStoreError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Filesystem blob store: one file per artifact at `<root>/<namespace>/<identifier>`.
///
/// Files are created with create-new semantics, so an existing pair is
/// never overwritten even by concurrent writers.
#[derive(Debug, Clone)]
pub struct FileSystemBlobStore {
    root: PathBuf,
}

impl FileSystemBlobStore {
    /// Create a store rooted at `root`. Directories are created lazily.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, namespace: &str, identifier: &str) -> PathBuf {
        self.root.join(namespace).join(identifier)
    }
}

/// Map an I/O error to a backend error without leaking the path.
fn io_error(e: std::io::Error) -> BlobStoreError {
    match e.kind() {
        ErrorKind::NotFound => BlobStoreError::NotFound,
        ErrorKind::AlreadyExists => BlobStoreError::AlreadyExists,
        kind => BlobStoreError::Io {
            reason: kind.to_string(),
        },
    }
}

#[async_trait]
impl BlobStore for FileSystemBlobStore {
    async fn put_new(
        &self,
        namespace: &str,
        identifier: &str,
        bytes: &[u8],
    ) -> Result<(), BlobStoreError> {
        fs::create_dir_all(self.root.join(namespace))
            .await
            .map_err(|e| BlobStoreError::Io {
                reason: e.kind().to_string(),
            })?;

        let path = self.blob_path(namespace, identifier);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(io_error)?;

        let written = match file.write_all(bytes).await {
            Ok(()) => file.sync_all().await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            // Don't leave a truncated artifact behind.
            let _ = fs::remove_file(&path).await;
            return Err(BlobStoreError::Io {
                reason: e.kind().to_string(),
            });
        }

        tracing::debug!(
            "[ta-03] wrote {} bytes to {}/{}",
            bytes.len(),
            namespace,
            identifier
        );
        Ok(())
    }

    async fn get(&self, namespace: &str, identifier: &str) -> Result<Vec<u8>, BlobStoreError> {
        fs::read(self.blob_path(namespace, identifier))
            .await
            .map_err(io_error)
    }

    async fn list(&self, namespace: &str) -> Result<Vec<String>, BlobStoreError> {
        let mut entries = match fs::read_dir(self.root.join(namespace)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e)),
        };

        let mut identifiers = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                identifiers.push(name.to_string());
            }
        }
        identifiers.sort();
        Ok(identifiers)
    }
}
