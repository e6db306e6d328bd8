//! Unauthenticated liveness and metrics routes.

use crate::domain::{ApiError, ApiResult, HealthResponse};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus text exposition.
pub async fn metrics() -> ApiResult<impl IntoResponse> {
    let body = dc_telemetry::encode_metrics().map_err(|e| {
        error!(error = %e, "failed to encode metrics");
        ApiError::internal()
    })?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found(crate::domain::error::messages::NOT_FOUND)
}
