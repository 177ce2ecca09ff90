use thiserror::Error;

/// Errors from the reconciliation tracker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconciliationError {
    /// No entry was ever opened for this identifier.
    #[error("No reconciliation entry for {identifier}")]
    NotFound { identifier: String },

    /// Entries can only be resolved to `confirmed` or `failed`.
    #[error("Cannot resolve an entry to pending")]
    InvalidTransition,

    /// Status name is not `pending`, `confirmed` or `failed`.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}
