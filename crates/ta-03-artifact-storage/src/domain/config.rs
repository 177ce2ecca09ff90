//! # Store Configuration

/// Default artifact ceiling: 256 KiB.
pub const DEFAULT_MAX_ARTIFACT_BYTES: usize = 256 * 1024;

/// Configuration for the content-addressed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum serialized artifact size in bytes (default: 256 KiB).
    pub max_artifact_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_artifact_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
        }
    }
}

impl StoreConfig {
    /// Override the artifact ceiling.
    pub fn with_max_artifact_bytes(mut self, max: usize) -> Self {
        self.max_artifact_bytes = max;
        self
    }
}
