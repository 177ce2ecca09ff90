//! CLI surface over a filesystem artifact store.
//!
//! The runtime has no ledger connection, so commands work purely from stored
//! artifacts; anchoring checks belong to the service that owns the ledger.

use crate::config::RuntimeConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use ta_03_artifact_storage::FileSystemBlobStore;
use ta_05_event_pipeline::{
    EventPipeline, InMemoryLedger, PipelineContext, PipelineDependencies,
};
use tracing::info;

/// Trace-Anchor artifact inspector
#[derive(Parser, Debug)]
#[command(name = "anchor-runtime")]
#[command(about = "Inspect, verify and recover Trace-Anchor event artifacts")]
pub struct Cli {
    /// Artifact root directory (overrides TA_STORAGE_DIR)
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-derive an artifact's commitment and compare it with the recorded one
    Verify { batch: String, identifier: String },
    /// List artifact identifiers stored for a batch
    List { batch: String },
    /// Print an artifact's envelope (the salt is withheld)
    Show { batch: String, identifier: String },
    /// Print the canonical payload bytes, decrypting with TA_AES_KEY if needed
    Recover { batch: String, identifier: String },
}

/// What a command printed, and whether the process should exit cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

/// Pipeline over `config.storage_dir` with no ledger behind it.
pub fn build_pipeline(config: &RuntimeConfig) -> EventPipeline {
    let blobs = Arc::new(FileSystemBlobStore::new(&config.storage_dir));
    let deps = PipelineDependencies::new(blobs, Arc::new(InMemoryLedger::new()));
    EventPipeline::new(Arc::new(PipelineContext::new(
        config.pipeline.clone(),
        deps,
    )))
}

pub async fn execute(pipeline: &EventPipeline, command: &Command) -> Result<Outcome> {
    match command {
        Command::Verify { batch, identifier } => {
            let report = pipeline
                .verify(batch, identifier)
                .await
                .with_context(|| format!("verifying {batch}/{identifier}"))?;
            info!(matches = report.matches, "[runtime] verify finished");
            Ok(Outcome {
                output: serde_json::to_string_pretty(&report)?,
                success: report.matches,
            })
        }
        Command::List { batch } => {
            let identifiers = pipeline
                .list(batch)
                .await
                .with_context(|| format!("listing {batch}"))?;
            Ok(Outcome::ok(identifiers.join("\n")))
        }
        Command::Show { batch, identifier } => {
            let artifact = pipeline
                .read_artifact(batch, identifier)
                .await
                .with_context(|| format!("reading {batch}/{identifier}"))?;
            let mut envelope = serde_json::to_value(artifact.envelope())?;
            if let Value::Object(fields) = &mut envelope {
                fields.remove("salt");
            }
            let mode = if artifact.is_encrypted() {
                "encrypted"
            } else {
                "plaintext"
            };
            let shown = json!({ "mode": mode, "envelope": envelope });
            Ok(Outcome::ok(serde_json::to_string_pretty(&shown)?))
        }
        Command::Recover { batch, identifier } => {
            let canonical = pipeline
                .recover_plaintext(batch, identifier)
                .await
                .with_context(|| format!("recovering {batch}/{identifier}"))?;
            Ok(Outcome::ok(
                String::from_utf8(canonical).context("canonical bytes are not UTF-8")?,
            ))
        }
    }
}
