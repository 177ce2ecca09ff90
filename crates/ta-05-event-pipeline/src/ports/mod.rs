//! # Ports Layer
//!
//! - **Outbound (Driven)**: the ledger collaborator

pub mod outbound;
