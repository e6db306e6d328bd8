//! # API Gateway
//!
//! **Component:** dc-05
//!
//! JSON HTTP surface over the interaction, report and points engines.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      API GATEWAY (dc-05)                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Trace → CatchPanic → BodyLimit → CORS → Timeout → Identity   │
//! │                            │                                  │
//! │   /interactions/*      /reports[/item]      /points/*         │
//! │          │                   │                  │             │
//! └──────────┼───────────────────┼──────────────────┼─────────────┘
//!            ▼                   ▼                  ▼
//!      dc-01 toggles       dc-02 intake       dc-03 award gate
//!            └───────────────────┴──────────────────┘
//!                                │
//!                          dc-04 store
//! ```
//!
//! ## Error Boundary
//!
//! | Engine error | Status |
//! |--------------|--------|
//! | `Unauthenticated` | 401 |
//! | validation, self/already following, not given, duplicate item report | 400 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `RateLimited` | 429 + `Retry-After` |
//! | store failure, `AwardFailed`, panic | 500 |
//!
//! Transport rejections (oversized body 413, timeout 408, wrong method 405)
//! are reshaped by `middleware::error_shape`, so bodies are always
//! `{success: false, error}` with a fixed message.
//!
//! # Usage
//!
//! ```ignore
//! use dc_05_api_gateway::{AppState, GatewayConfig, GatewayService};
//!
//! let state = AppState::new(interactions, reports, points);
//! let mut gateway = GatewayService::new(config, state)?;
//! gateway.start().await?;
//! tokio::signal::ctrl_c().await?;
//! gateway.shutdown().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

pub use domain::{
    ApiError, ApiResult, ConfigError, CorsConfig, GatewayConfig, GatewayError, HttpConfig,
    IdentityConfig,
};
pub use handlers::AppState;
pub use middleware::{
    HmacSessionResolver, IdentityLayer, ResolverChain, SessionResolver, StaticSessionResolver,
};
pub use router::build_router;
pub use service::GatewayService;
