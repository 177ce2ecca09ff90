//! Pipeline configuration.
//!
//! # Environment Variables
//!
//! - `TA_CHAIN_ID`: typed-data chain id (default: 11155111)
//! - `TA_DOMAIN_NAME`: typed-data domain name (default: FoodTrace)
//! - `TA_DOMAIN_VERSION`: typed-data domain version (default: 1)
//! - `TA_MAX_EVENT_BYTES`: artifact ceiling in bytes (default: 262144)
//! - `TA_AES_KEY`: 64 hex chars. Absent means plaintext mode; present but
//!   malformed is an error, never a silent fallback.

use crate::domain::authorization::AuthorizationMatrix;
use shared_crypto::SecretKey;
use std::env;
use ta_02_signature_verification::TypedDataDomain;
use ta_03_artifact_storage::StoreConfig;
use thiserror::Error;

pub const ENV_CHAIN_ID: &str = "TA_CHAIN_ID";
pub const ENV_DOMAIN_NAME: &str = "TA_DOMAIN_NAME";
pub const ENV_DOMAIN_VERSION: &str = "TA_DOMAIN_VERSION";
pub const ENV_MAX_EVENT_BYTES: &str = "TA_MAX_EVENT_BYTES";
pub const ENV_AES_KEY: &str = "TA_AES_KEY";

/// Invalid configuration value. Never echoes key material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    #[error("{ENV_AES_KEY} is set but is not a 32-byte hex key: {reason}")]
    InvalidKey { reason: String },
}

/// Everything a `PipelineContext` is configured with.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Signing domain shared with wallets.
    pub domain: TypedDataDomain,
    /// Artifact size ceiling.
    pub store: StoreConfig,
    /// `Some` enables AES-256-GCM for artifact bodies.
    pub encryption_key: Option<SecretKey>,
    /// Event type → allowed roles.
    pub authorization: AuthorizationMatrix,
}

impl PipelineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// absent variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_DOMAIN_NAME) {
            config.domain.name = name;
        }
        if let Some(version) = lookup(ENV_DOMAIN_VERSION) {
            config.domain.version = version;
        }
        if let Some(raw) = lookup(ENV_CHAIN_ID) {
            config.domain.chain_id = parse_number(ENV_CHAIN_ID, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_EVENT_BYTES) {
            let max: usize = parse_number(ENV_MAX_EVENT_BYTES, &raw)?;
            if max == 0 {
                return Err(ConfigError::InvalidValue {
                    var: ENV_MAX_EVENT_BYTES,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.store = config.store.with_max_artifact_bytes(max);
        }
        if let Some(raw) = lookup(ENV_AES_KEY) {
            let key = SecretKey::from_hex(&raw).map_err(|e| ConfigError::InvalidKey {
                reason: e.to_string(),
            })?;
            config.encryption_key = Some(key);
        }

        Ok(config)
    }

    pub fn with_domain(mut self, domain: TypedDataDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_max_artifact_bytes(mut self, max: usize) -> Self {
        self.store = self.store.with_max_artifact_bytes(max);
        self
    }

    pub fn with_encryption_key(mut self, key: SecretKey) -> Self {
        self.encryption_key = Some(key);
        self
    }

    pub fn with_authorization(mut self, authorization: AuthorizationMatrix) -> Self {
        self.authorization = authorization;
        self
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
        })
}
