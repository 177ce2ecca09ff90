//! `anchor-runtime` entry point.
//!
//! ## Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from the environment (a malformed key aborts here)
//! 3. Install the log subscriber
//! 4. Run the command against the artifact directory

use anchor_runtime::{build_pipeline, execute, init_logging, Cli, RuntimeConfig};
use anyhow::Result;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env()?;
    if let Some(dir) = cli.storage_dir.clone() {
        config.storage_dir = dir;
    }
    init_logging(&config)?;
    debug!(
        storage_dir = %config.storage_dir.display(),
        encrypted = config.pipeline.encryption_key.is_some(),
        "[runtime] configuration loaded"
    );

    let pipeline = build_pipeline(&config);
    let outcome = execute(&pipeline, &cli.command).await?;
    println!("{}", outcome.output);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
