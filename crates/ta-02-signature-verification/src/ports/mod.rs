//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the event pipeline calls

pub mod inbound;
