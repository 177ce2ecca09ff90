//! # Pipeline Errors
//!
//! One variant per failure a caller must be able to tell apart. Cryptographic
//! and validation failures are never folded into a generic error.
//!
//! | Class | Variants | Retry |
//! |-------|----------|-------|
//! | Client fault | `Canonicalization`, `EmptyPayload`, `InvalidSignature`, `SignatureMismatch`, `RoleDenied`, `InvalidNamespace`, `InvalidIdentifier`, `PayloadTooLarge`, `InvalidTransition` | no |
//! | Integrity | `AuthenticationFailed`, `MalformedArtifact` | never; tamper evidence |
//! | Lookup | `ArtifactNotFound`, `EntryNotFound` | no |
//! | Infrastructure | `StorageIo`, `LedgerUnavailable` | yes, with backoff |

use shared_crypto::CryptoError;
use shared_types::{Address, EventType, Role, TypeError};
use ta_01_commitment::{CanonicalizationError, CommitmentError};
use ta_02_signature_verification::SignatureError;
use ta_03_artifact_storage::ArtifactStoreError;
use ta_04_reconciliation::ReconciliationError;
use thiserror::Error;

/// Errors surfaced by the event pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// Payload has no canonical form.
    #[error("Canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Payload is absent.
    #[error("Payload is empty")]
    EmptyPayload,

    /// Signature is malformed; no signer can be recovered.
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// Signature is valid but was produced by someone other than the claimed signer.
    #[error("Signature mismatch: claimed {claimed}, recovered {recovered}")]
    SignatureMismatch { claimed: Address, recovered: Address },

    /// Signer's role may not submit this event type.
    #[error("Role {role} may not submit {event_type} events (signer {signer})")]
    RoleDenied {
        signer: Address,
        role: Role,
        event_type: EventType,
    },

    /// Namespace is not a batch id.
    #[error("Invalid namespace")]
    InvalidNamespace,

    /// Identifier fails the allow-list.
    #[error("Invalid identifier")]
    InvalidIdentifier,

    /// Serialized artifact exceeds the configured ceiling.
    #[error("Artifact too large: {size} bytes exceeds limit of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// Ciphertext, nonce or tag failed authentication.
    #[error("Authentication failed: artifact ciphertext was altered")]
    AuthenticationFailed,

    /// Stored bytes do not parse as a consistent artifact.
    #[error("Malformed artifact: {reason}")]
    MalformedArtifact { reason: String },

    /// Artifact is encrypted and no key is configured.
    #[error("Artifact is encrypted and no decryption key is configured")]
    DecryptionKeyUnavailable,

    /// Sealing the artifact body failed.
    #[error("Encryption failed: {reason}")]
    Encryption { reason: String },

    /// No artifact at `(namespace, identifier)`.
    #[error("Artifact not found: {namespace}/{identifier}")]
    ArtifactNotFound {
        namespace: String,
        identifier: String,
    },

    /// No reconciliation entry for `identifier`.
    #[error("No reconciliation entry for {identifier}")]
    EntryNotFound { identifier: String },

    /// Resolving to `pending` is not a transition.
    #[error("Invalid status transition")]
    InvalidTransition,

    /// Transient storage failure.
    #[error("Storage I/O error: {reason}")]
    StorageIo { reason: String },

    /// Ledger could not be reached or refused the call. When `identifier` is
    /// set the artifact is persisted and tracked as `pending`.
    #[error("Ledger unavailable: {reason}")]
    LedgerUnavailable {
        identifier: Option<String>,
        reason: String,
    },
}

impl PipelineError {
    /// Transient fault; the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageIo { .. } | Self::LedgerUnavailable { .. }
        )
    }

    /// The request itself is at fault (4xx-equivalent).
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::Canonicalization(_)
                | Self::EmptyPayload
                | Self::InvalidSignature(_)
                | Self::SignatureMismatch { .. }
                | Self::RoleDenied { .. }
                | Self::InvalidNamespace
                | Self::InvalidIdentifier
                | Self::PayloadTooLarge { .. }
                | Self::InvalidTransition
        )
    }

    /// Evidence that stored data was altered.
    pub fn is_tamper_evidence(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::MalformedArtifact { .. }
        )
    }
}

impl From<CommitmentError> for PipelineError {
    fn from(e: CommitmentError) -> Self {
        match e {
            CommitmentError::EmptyPayload => Self::EmptyPayload,
            CommitmentError::Canonicalization(inner) => Self::Canonicalization(inner),
            CommitmentError::MalformedDigest(reason) => Self::MalformedArtifact { reason },
        }
    }
}

impl From<ArtifactStoreError> for PipelineError {
    fn from(e: ArtifactStoreError) -> Self {
        match e {
            ArtifactStoreError::InvalidNamespace => Self::InvalidNamespace,
            ArtifactStoreError::InvalidIdentifier => Self::InvalidIdentifier,
            ArtifactStoreError::PayloadTooLarge { size, max } => Self::PayloadTooLarge { size, max },
            ArtifactStoreError::NotFound {
                namespace,
                identifier,
            } => Self::ArtifactNotFound {
                namespace,
                identifier,
            },
            ArtifactStoreError::IdentifierExhausted => Self::StorageIo {
                reason: "could not allocate a fresh identifier".to_string(),
            },
            ArtifactStoreError::Io { reason } => Self::StorageIo { reason },
        }
    }
}

impl From<ReconciliationError> for PipelineError {
    fn from(e: ReconciliationError) -> Self {
        match e {
            ReconciliationError::NotFound { identifier } => Self::EntryNotFound { identifier },
            ReconciliationError::InvalidTransition | ReconciliationError::UnknownStatus(_) => {
                Self::InvalidTransition
            }
        }
    }
}

impl From<CryptoError> for PipelineError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::AuthenticationFailed => Self::AuthenticationFailed,
            other => Self::Encryption {
                reason: other.to_string(),
            },
        }
    }
}

impl From<TypeError> for PipelineError {
    fn from(e: TypeError) -> Self {
        Self::MalformedArtifact {
            reason: e.to_string(),
        }
    }
}
