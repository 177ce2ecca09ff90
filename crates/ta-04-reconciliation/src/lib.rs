//! # Reconciliation Subsystem (TA-04)
//!
//! Tracks the ledger anchoring outcome of every stored artifact.
//!
//! ## State Machine
//!
//! ```text
//! open ──> pending ──resolve──> confirmed
//!                    └─resolve──> failed
//! ```
//!
//! Both terminal states are final. An artifact present in storage but never
//! opened here (an orphan from an interrupted write) is treated by callers
//! as `pending` with no ledger reference.

pub mod domain;
pub mod tracker;

pub use domain::entities::{ReconciliationStatus, TrackerEntry};
pub use domain::errors::ReconciliationError;
pub use tracker::ReconciliationTracker;
