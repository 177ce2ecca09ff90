//! # Adapters
//!
//! - `ledger`: `InMemoryLedger`, a process-local stand-in for the chain

pub mod ledger;

pub use ledger::{AnchorRecord, InMemoryLedger};
