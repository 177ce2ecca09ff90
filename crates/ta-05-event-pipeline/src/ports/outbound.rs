//! # Outbound Ports (Driven Ports / SPI)
//!
//! The ledger holds participant roles and the append-only log of anchored
//! commitments. Only commitments are ever sent to it, never salts.

use async_trait::async_trait;
use shared_types::{Address, BatchId, Commitment, EventType};
use thiserror::Error;

/// Error from the ledger collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Ledger could not be reached or timed out.
    #[error("Ledger unavailable: {reason}")]
    Unavailable { reason: String },

    /// Ledger refused the anchoring transaction.
    #[error("Anchoring rejected: {reason}")]
    Rejected { reason: String },
}

/// Gateway to the external ledger.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Role code assigned to `address` (`0` when unregistered).
    async fn role_of(&self, address: &Address) -> Result<u8, LedgerError>;

    /// Append `commitment` to the batch's log and return the ledger
    /// transaction reference.
    async fn anchor_commitment(
        &self,
        batch_id: &BatchId,
        commitment: &Commitment,
        event_type: EventType,
    ) -> Result<String, LedgerError>;

    /// Commitments previously anchored for the batch, oldest first.
    async fn anchored_commitments(&self, batch_id: &BatchId) -> Result<Vec<Commitment>, LedgerError>;
}
