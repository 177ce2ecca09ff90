//! # Domain Layer
//!
//! Key validation, limits and errors. No I/O.

pub mod config;
pub mod errors;
pub mod keys;
