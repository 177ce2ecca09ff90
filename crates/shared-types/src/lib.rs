//! # Shared Types Crate
//!
//! This crate contains the event entities, the signed `EventEnvelope` and the
//! persisted `StoredArtifact` shared by every Trace-Anchor subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Stable Wire Form**: Fixed-size identifiers serialize as `0x`-prefixed
//!   lowercase hex and parse from either case.
//! - **Salt Stays Off-Ledger**: Only `Commitment` values are ever handed to
//!   the ledger collaborator; `Salt` lives in the envelope and the receipt.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod time;

pub use entities::*;
pub use envelope::{EncryptionAlgorithm, EncryptionMeta, EventEnvelope, StoredArtifact};
pub use errors::TypeError;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource, Timestamp};
