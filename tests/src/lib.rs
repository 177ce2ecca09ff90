//! # Trace-Anchor Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Harness over both blob backends
//! ├── integration/      # End-to-end write, verify and reconcile flows
//! └── exploits/         # Tampering and traversal attempts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ta-tests
//!
//! # By category
//! cargo test -p ta-tests integration::
//! cargo test -p ta-tests exploits::
//! ```

pub mod exploits;
pub mod fixtures;
pub mod integration;
