//! # Domain Layer
//!
//! Pure canonicalization and commitment logic with no I/O dependencies.

pub mod canonical;
pub mod commitment;
pub mod errors;
