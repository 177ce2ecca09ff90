//! # Pipeline Entities
//!
//! Request and response shapes of the write, verify and status entry points.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Commitment, EventPayload, HexBytes, Salt};
use ta_04_reconciliation::ReconciliationStatus;

/// A signed event submitted for writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteRequest {
    pub payload: EventPayload,
    /// 65-byte typed-data signature over the payload.
    pub signature: HexBytes,
    /// Address the submitter claims signed the payload.
    pub claimed_signer: Address,
}

impl WriteRequest {
    pub fn new(payload: EventPayload, signature: impl Into<Vec<u8>>, claimed_signer: Address) -> Self {
        Self {
            payload,
            signature: HexBytes(signature.into()),
            claimed_signer,
        }
    }
}

/// Returned to the writer exactly once. This is the only place the salt is
/// handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReceipt {
    pub namespace: String,
    pub identifier: String,
    pub commitment: Commitment,
    pub salt: Salt,
    pub status: ReconciliationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    pub encrypted: bool,
}

/// Result of re-deriving a stored artifact's commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub namespace: String,
    pub identifier: String,
    /// Commitment recomputed from payload and salt.
    pub recomputed: Commitment,
    /// Commitment recorded in the envelope.
    pub recorded: Commitment,
    /// Recomputed equals recorded and the stored body agrees with the payload.
    pub matches: bool,
    pub encrypted: bool,
    /// True when the ciphertext was decrypted and compared.
    pub ciphertext_checked: bool,
}

/// `VerificationReport` plus the ledger's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchoredVerification {
    #[serde(flatten)]
    pub report: VerificationReport,
    /// The recomputed commitment is among the batch's anchored digests.
    pub anchored: bool,
}

/// Anchoring status of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub identifier: String,
    pub status: ReconciliationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    /// False when the artifact was found in storage with no tracker entry.
    pub tracked: bool,
}
