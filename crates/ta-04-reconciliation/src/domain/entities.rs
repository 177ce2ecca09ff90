//! # Reconciliation Entities

use super::errors::ReconciliationError;
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;
use std::fmt;
use std::str::FromStr;

/// Anchoring status of a stored artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Written, ledger outcome not yet known.
    Pending,
    /// Ledger accepted the anchoring transaction.
    Confirmed,
    /// Ledger rejected it, or anchoring was abandoned.
    Failed,
}

impl ReconciliationStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }

    /// True once the status can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconciliationStatus {
    type Err = ReconciliationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "failed" => Ok(Self::Failed),
            other => Err(ReconciliationError::UnknownStatus(other.to_string())),
        }
    }
}

/// One tracked artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerEntry {
    pub identifier: String,
    pub status: ReconciliationStatus,
    /// Ledger transaction reference, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TrackerEntry {
    /// Fresh `pending` entry.
    pub fn pending(identifier: impl Into<String>, now: Timestamp) -> Self {
        Self {
            identifier: identifier.into(),
            status: ReconciliationStatus::Pending,
            external_reference: None,
            created_at: now,
            updated_at: now,
        }
    }
}
