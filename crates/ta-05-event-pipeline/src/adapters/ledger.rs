use crate::ports::outbound::{LedgerError, LedgerGateway};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::keccak256;
use shared_types::{Address, BatchId, Commitment, EventType, Role};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// One anchored commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRecord {
    pub commitment: Commitment,
    pub event_type: EventType,
    pub reference: String,
}

/// In-memory ledger for tests and local runs.
///
/// Role assignments and anchors live in process memory. Availability can be
/// toggled to exercise the ledger-failure paths.
pub struct InMemoryLedger {
    roles: RwLock<HashMap<Address, u8>>,
    anchors: RwLock<HashMap<BatchId, Vec<AnchorRecord>>>,
    available: AtomicBool,
    sequence: AtomicU64,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
            anchors: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            sequence: AtomicU64::new(0),
        }
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `role` to `address`, replacing any previous role.
    pub fn assign_role(&self, address: Address, role: Role) {
        self.roles.write().insert(address, role.code());
    }

    /// Store a raw role code, including codes outside the known roles.
    pub fn assign_role_code(&self, address: Address, code: u8) {
        self.roles.write().insert(address, code);
    }

    /// Simulate the ledger going down or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Anchors recorded for `batch_id`.
    pub fn anchors(&self, batch_id: &BatchId) -> Vec<AnchorRecord> {
        self.anchors
            .read()
            .get(batch_id)
            .cloned()
            .unwrap_or_default()
    }

    fn ensure_available(&self) -> Result<(), LedgerError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LedgerError::Unavailable {
                reason: "in-memory ledger offline".to_string(),
            })
        }
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn role_of(&self, address: &Address) -> Result<u8, LedgerError> {
        self.ensure_available()?;
        Ok(self
            .roles
            .read()
            .get(address)
            .copied()
            .unwrap_or(Role::Unregistered.code()))
    }

    async fn anchor_commitment(
        &self,
        batch_id: &BatchId,
        commitment: &Commitment,
        event_type: EventType,
    ) -> Result<String, LedgerError> {
        self.ensure_available()?;

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let mut preimage = Vec::with_capacity(72);
        preimage.extend_from_slice(batch_id.as_bytes());
        preimage.extend_from_slice(commitment.as_bytes());
        preimage.extend_from_slice(&sequence.to_be_bytes());
        let reference = format!("0x{}", hex::encode(keccak256(&preimage)));

        self.anchors
            .write()
            .entry(*batch_id)
            .or_default()
            .push(AnchorRecord {
                commitment: *commitment,
                event_type,
                reference: reference.clone(),
            });
        Ok(reference)
    }

    async fn anchored_commitments(&self, batch_id: &BatchId) -> Result<Vec<Commitment>, LedgerError> {
        self.ensure_available()?;
        Ok(self
            .anchors
            .read()
            .get(batch_id)
            .map(|records| records.iter().map(|r| r.commitment).collect())
            .unwrap_or_default())
    }
}
