//! # Event Pipeline (TA-05)
//!
//! Ties the subsystems together: a signed event is verified, authorized,
//! committed, optionally sealed, persisted and tracked until the ledger
//! confirms its commitment.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): authorization matrix, encryption mode,
//!   request/response shapes
//! - **Ports Layer** (`ports/`): `LedgerGateway`
//! - **Adapters** (`adapters/`): `InMemoryLedger`
//! - **Context** (`context.rs`): explicitly constructed collaborators
//! - **Service Layer** (`service.rs`): `EventPipeline`
//!
//! ## Usage
//!
//! ```ignore
//! let deps = PipelineDependencies::new(blobs, ledger);
//! let ctx = Arc::new(PipelineContext::new(PipelineConfig::from_env()?, deps));
//! let pipeline = EventPipeline::new(ctx);
//!
//! let receipt = pipeline.write_and_anchor(&request).await?;
//! let report = pipeline.verify(&receipt.namespace, &receipt.identifier).await?;
//! assert!(report.matches);
//! ```
//!
//! ## Security Notes
//!
//! - The salt leaves the pipeline only in the `WriteReceipt`; the ledger
//!   receives the commitment alone.
//! - Salts, keys, plaintext and ciphertext are never logged.

pub mod adapters;
pub mod config;
pub mod context;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::{AnchorRecord, InMemoryLedger};
pub use config::{ConfigError, PipelineConfig};
pub use context::{PipelineContext, PipelineDependencies};
pub use domain::authorization::AuthorizationMatrix;
pub use domain::encryption::EncryptionMode;
pub use domain::entities::{
    AnchoredVerification, StatusReport, VerificationReport, WriteReceipt, WriteRequest,
};
pub use errors::PipelineError;
pub use ports::outbound::{LedgerError, LedgerGateway};
pub use service::EventPipeline;
