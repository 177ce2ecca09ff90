//! # Trace-Anchor Runtime
//!
//! Operator CLI over a directory of stored event artifacts.
//!
//! - `config` - `RuntimeConfig` from the environment
//! - `logging` - `tracing-subscriber` setup (pretty or JSON)
//! - `commands` - clap surface and command execution

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{build_pipeline, execute, Cli, Command, Outcome};
pub use config::RuntimeConfig;
pub use logging::init_logging;
