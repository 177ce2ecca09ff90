//! Runtime configuration.
//!
//! # Environment Variables
//!
//! - `TA_STORAGE_DIR`: artifact root directory (default: ./ta-data)
//! - `TA_LOG_LEVEL`: filter used when `RUST_LOG` is unset (default: info)
//! - `TA_JSON_LOGS`: JSON log lines (default: false)
//!
//! Plus every pipeline variable read by `PipelineConfig::from_env`.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use ta_05_event_pipeline::PipelineConfig;

pub const ENV_STORAGE_DIR: &str = "TA_STORAGE_DIR";
pub const ENV_LOG_LEVEL: &str = "TA_LOG_LEVEL";
pub const ENV_JSON_LOGS: &str = "TA_JSON_LOGS";

/// Settings of one CLI invocation.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub storage_dir: PathBuf,
    pub log_level: String,
    pub json_logs: bool,
    pub pipeline: PipelineConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./ta-data"),
            log_level: "info".to_string(),
            json_logs: false,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pipeline =
            PipelineConfig::from_lookup(&lookup).context("invalid pipeline configuration")?;

        Ok(Self {
            storage_dir: lookup(ENV_STORAGE_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            json_logs: match lookup(ENV_JSON_LOGS) {
                Some(raw) => parse_flag(ENV_JSON_LOGS, &raw)?,
                None => defaults.json_logs,
            },
            pipeline,
        })
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("{var}: expected a boolean, got {other:?}"),
    }
}
