use crate::domain::config::GatewayConfig;
use crate::domain::ApiError;
use crate::handlers::{health, interactions, points, reports, AppState};
use crate::middleware::{
    create_cors_layer, json_error_response, IdentityLayer, SessionResolver,
};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Builds the full HTTP router.
///
/// Routes under `/interactions`, `/reports` and `/points` see the resolved
/// [`shared_types::Caller`]; `/health` and `/metrics` ignore it.
pub fn build_router(
    config: &GatewayConfig,
    state: AppState,
    resolver: Arc<dyn SessionResolver>,
) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .map_response(json_error_response)
        .layer(RequestBodyLimitLayer::new(config.http.max_body_bytes))
        .layer(create_cors_layer(&config.cors))
        .layer(TimeoutLayer::new(config.http.request_timeout()));

    Router::new()
        .route(
            "/interactions/like",
            post(interactions::toggle_like)
                .delete(interactions::remove_like)
                .get(interactions::like_state),
        )
        .route(
            "/interactions/save",
            post(interactions::toggle_save)
                .delete(interactions::remove_save)
                .get(interactions::save_state),
        )
        .route(
            "/interactions/share",
            post(interactions::toggle_share).get(interactions::share_state),
        )
        .route(
            "/interactions/follow",
            post(interactions::follow)
                .delete(interactions::unfollow)
                .get(interactions::follow_state),
        )
        .route("/reports", post(reports::submit_report))
        .route("/reports/item", post(reports::submit_item_report))
        .route("/points/award", post(points::award))
        .route("/points/balance", get(points::balance))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .fallback(health::not_found)
        .layer(IdentityLayer::new(resolver))
        .layer(middleware)
        .with_state(state)
}

/// Panics become the generic 500; the payload is logged, never returned.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = detail, "handler panicked");
    ApiError::internal().into_response()
}
