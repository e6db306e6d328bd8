//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use shared_types::UserId;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Session resolution
    pub identity: IdentityConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout_secs cannot be 0".into(),
            ));
        }

        if self.http.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit("max_body_bytes cannot be 0".into()));
        }

        self.identity.validate()
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port
    pub port: u16,
    /// Whole-request deadline
    pub request_timeout_secs: u64,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
    /// Allow credentials
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "DELETE", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
            max_age: 86400, // 24 hours
            allow_credentials: false,
        }
    }
}

/// Session resolution configuration.
///
/// At least one resolver must be enabled. Both may be active at once; the
/// static table is consulted first.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Shared secret for signed session tokens
    pub session_secret: Option<String>,
    /// Fixed token → user id table for development
    pub static_sessions: HashMap<String, String>,
}

impl IdentityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.session_secret.is_none() && self.static_sessions.is_empty() {
            return Err(ConfigError::NoSessionResolver);
        }

        if matches!(&self.session_secret, Some(secret) if secret.trim().is_empty()) {
            return Err(ConfigError::Invalid("session_secret cannot be blank".into()));
        }

        for (token, user) in &self.static_sessions {
            if token.trim().is_empty() {
                return Err(ConfigError::InvalidSession("blank token".into()));
            }
            UserId::parse(user)
                .map_err(|e| ConfigError::InvalidSession(format!("user {user:?}: {e}")))?;
        }

        Ok(())
    }
}

// The secret and tokens never reach logs.
impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("session_secret", &self.session_secret.as_ref().map(|_| "<redacted>"))
            .field("static_sessions", &self.static_sessions.len())
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("http port cannot be 0")]
    InvalidPort,
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("no session resolver configured: set a session secret or static sessions")]
    NoSessionResolver,
    #[error("invalid static session: {0}")]
    InvalidSession(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
