//! Cross-subsystem flows through `EventPipeline`.

pub mod reconciliation;
pub mod signing;
pub mod write_verify;
