//! # Domain Layer
//!
//! Authorization table, encryption mode and the request/response shapes of
//! the pipeline entry points.

pub mod authorization;
pub mod encryption;
pub mod entities;
