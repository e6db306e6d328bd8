//! Domain types for the API Gateway.
//!
//! Configuration, the HTTP error model and request/response bodies.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig, IdentityConfig};
pub use error::{ApiError, ApiResult, GatewayError};
pub use types::*;
