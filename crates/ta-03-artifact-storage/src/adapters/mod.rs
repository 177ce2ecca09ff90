//! # Adapters
//!
//! - `memory`: `InMemoryBlobStore` for tests and single-process use
//! - `filesystem`: `FileSystemBlobStore`, one file per artifact

pub mod filesystem;
pub mod memory;

pub use filesystem::FileSystemBlobStore;
pub use memory::InMemoryBlobStore;
