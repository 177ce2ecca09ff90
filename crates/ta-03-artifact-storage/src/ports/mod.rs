//! # Ports Layer
//!
//! - **Outbound (Driven)**: the blob backend this subsystem writes through

pub mod outbound;
