//! # Node Configuration
//!
//! Unified configuration for the gateway, the engines and the store.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults (every section is optional)
//! 2. TOML file passed with `--config`
//! 3. `DC_*` environment variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DC_HTTP_HOST` | `http.host` |
//! | `DC_HTTP_PORT` | `http.port` |
//! | `DC_SESSION_SECRET` | `identity.session_secret` |
//! | `DC_STORE` | `store.backend` (`memory` or `rocksdb`) |
//! | `DC_DATA_DIR` | `store.data_dir` |
//! | `DC_SEED_ITEMS` | `store.seed_items` |

use dc_02_reports::ReportLimits;
use dc_04_store::{LedgerPolicy, LedgerPolicyError};
use dc_05_api_gateway::{CorsConfig, GatewayConfig, HttpConfig, IdentityConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP listener.
    pub http: HttpConfig,
    /// Cross-origin policy.
    pub cors: CorsConfig,
    /// Session resolution.
    pub identity: IdentityConfig,
    /// Report throttling.
    pub reports: ReportLimits,
    /// Storage backend and item seeding.
    pub store: StoreConfig,
    /// Points and ranks.
    pub ledger: LedgerPolicy,
}

impl NodeConfig {
    /// Defaults, overlaid with `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Applies `DC_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `DC_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DC_HTTP_HOST") {
            self.http.host = parse_env("DC_HTTP_HOST", &host)?;
        }
        if let Some(port) = lookup("DC_HTTP_PORT") {
            self.http.port = parse_env("DC_HTTP_PORT", &port)?;
        }
        if let Some(secret) = lookup("DC_SESSION_SECRET") {
            self.identity.session_secret = Some(secret);
        }
        if let Some(backend) = lookup("DC_STORE") {
            self.store.backend = parse_env("DC_STORE", &backend)?;
        }
        if let Some(dir) = lookup("DC_DATA_DIR") {
            self.store.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = lookup("DC_SEED_ITEMS") {
            self.store.seed_items = Some(PathBuf::from(seed));
        }
        Ok(())
    }

    /// The gateway's slice of this configuration.
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            http: self.http.clone(),
            cors: self.cors.clone(),
            identity: self.identity.clone(),
        }
    }

    /// Rejects configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway().validate()?;

        if self.reports.enabled && (self.reports.reports_per_minute == 0 || self.reports.burst == 0)
        {
            return Err(ConfigError::InvalidLimit(
                "reports.reports_per_minute and reports.burst cannot be 0".into(),
            ));
        }

        self.ledger.validate()?;

        if self.store.backend == StoreBackend::Rocksdb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable("rocksdb"));
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// RocksDB under `data_dir`.
    Rocksdb,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::Rocksdb),
            _ => Err(()),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Data directory for persistent backends.
    pub data_dir: PathBuf,
    /// fsync every write batch.
    pub sync_writes: bool,
    /// JSON array of items loaded at startup.
    pub seed_items: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: PathBuf::from("./data"),
            sync_writes: true,
            seed_items: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Gateway(#[from] dc_05_api_gateway::ConfigError),

    #[error("invalid ledger policy: {0}")]
    Ledger(#[from] LedgerPolicyError),

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("store backend {0:?} is not compiled in; rebuild with --features {0}")]
    BackendUnavailable(&'static str),
}
