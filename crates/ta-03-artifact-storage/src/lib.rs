//! # Artifact Storage Subsystem (TA-03)
//!
//! Write-once, content-addressed storage for serialized event artifacts.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): key validation, size limit, errors
//! - **Ports Layer** (`ports/`): `BlobStore` backend trait
//! - **Adapters** (`adapters/`): in-memory and filesystem backends
//! - **Service Layer** (`service.rs`): `ContentAddressedStore`
//!
//! ## Security Notes
//!
//! - Namespaces must be `0x` + 64 hex digits; identifiers must match
//!   `[A-Za-z0-9._-]+`. Both are checked before any backend access, which
//!   is the path-traversal defense.
//! - Identifiers are random (`<uuid-v4>.json`), never derived from content.
//! - An existing `(namespace, identifier)` pair is never overwritten.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileSystemBlobStore, InMemoryBlobStore};
pub use domain::config::{StoreConfig, DEFAULT_MAX_ARTIFACT_BYTES};
pub use domain::errors::ArtifactStoreError;
pub use domain::keys::{
    new_identifier, validate_identifier, validate_namespace, IDENTIFIER_EXTENSION,
    MAX_IDENTIFIER_LEN,
};
pub use ports::outbound::{BlobStore, BlobStoreError};
pub use service::{ArtifactLocation, ContentAddressedStore};
