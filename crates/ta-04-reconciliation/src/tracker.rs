//! # Reconciliation Tracker
//!
//! `pending -> confirmed | failed`, at most once per identifier. A second
//! resolve is a no-op that returns the first recorded outcome, so duplicate
//! confirmations from retried client requests are harmless.
//!
//! The lock is never held across an await point (all methods are sync).

use crate::domain::entities::{ReconciliationStatus, TrackerEntry};
use crate::domain::errors::ReconciliationError;
use parking_lot::RwLock;
use shared_types::{SystemTimeSource, TimeSource};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// In-process status tracker shared by all pipeline tasks.
pub struct ReconciliationTracker {
    entries: RwLock<HashMap<String, TrackerEntry>>,
    time_source: Arc<dyn TimeSource>,
}

impl Default for ReconciliationTracker {
    fn default() -> Self {
        Self::new(Arc::new(SystemTimeSource))
    }
}

impl ReconciliationTracker {
    pub fn new(time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            time_source,
        }
    }

    /// Start tracking `identifier` as `pending`.
    ///
    /// Opening an identifier that is already tracked returns the existing
    /// entry unchanged.
    pub fn open(&self, identifier: &str) -> TrackerEntry {
        let now = self.time_source.now();
        let mut entries = self.entries.write();
        entries
            .entry(identifier.to_string())
            .or_insert_with(|| {
                debug!("[ta-04] tracking {} as pending", identifier);
                TrackerEntry::pending(identifier, now)
            })
            .clone()
    }

    /// Move a `pending` entry to `status`.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when `status` is `Pending`
    /// - `NotFound` when the identifier was never opened
    pub fn resolve(
        &self,
        identifier: &str,
        status: ReconciliationStatus,
        external_reference: Option<String>,
    ) -> Result<TrackerEntry, ReconciliationError> {
        if !status.is_terminal() {
            return Err(ReconciliationError::InvalidTransition);
        }

        let now = self.time_source.now();
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(identifier)
            .ok_or_else(|| ReconciliationError::NotFound {
                identifier: identifier.to_string(),
            })?;

        if entry.status.is_terminal() {
            if entry.status != status {
                debug!(
                    "[ta-04] ignoring {} for {}: already {}",
                    status, identifier, entry.status
                );
            }
            return Ok(entry.clone());
        }

        entry.status = status;
        entry.external_reference = external_reference;
        entry.updated_at = now;
        info!(
            identifier = %identifier,
            status = %status,
            reference = ?entry.external_reference,
            "[ta-04] reconciliation resolved"
        );
        Ok(entry.clone())
    }

    /// Current entry for `identifier`.
    pub fn get(&self, identifier: &str) -> Result<TrackerEntry, ReconciliationError> {
        self.entries
            .read()
            .get(identifier)
            .cloned()
            .ok_or_else(|| ReconciliationError::NotFound {
                identifier: identifier.to_string(),
            })
    }

    /// Entries in `status`, oldest first.
    pub fn entries_with_status(&self, status: ReconciliationStatus) -> Vec<TrackerEntry> {
        let mut matching: Vec<TrackerEntry> = self
            .entries
            .read()
            .values()
            .filter(|e| e.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });
        matching
    }

    /// Number of tracked identifiers.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
