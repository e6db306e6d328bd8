//! API Gateway error types.
//!
//! Every failure leaves the gateway as `{success: false, error: <message>}`.
//! Messages are fixed strings; engine and store error text only goes to logs.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use dc_telemetry::HTTP_ERRORS;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Client-facing messages.
pub mod messages {
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const INVALID_BODY: &str = "Invalid request body";
    pub const INVALID_QUERY: &str = "Invalid query parameters";
    pub const BODY_TOO_LARGE: &str = "Request body too large";
    pub const ITEM_ID_REQUIRED: &str = "Item ID is required";
    pub const INVALID_ITEM_ID: &str = "Invalid item ID";
    pub const USER_ID_REQUIRED: &str = "User ID is required";
    pub const INVALID_USER_ID: &str = "Invalid user ID";
    pub const SELF_FOLLOW: &str = "You cannot follow yourself";
    pub const ALREADY_FOLLOWING: &str = "Already following this user";
    pub const REASON_REQUIRED: &str = "Reason is required";
    pub const INVALID_REASON: &str = "Invalid report reason";
    pub const REASON_TOO_LONG: &str = "Reason must be 100 characters or less";
    pub const TARGET_REQUIRED: &str = "Either an item or a user must be reported";
    pub const AMBIGUOUS_TARGET: &str = "Report either an item or a user, not both";
    pub const INVALID_TARGET: &str = "Invalid report target";
    pub const DETAILS_REQUIRED: &str = "Please provide details for 'Other' reports";
    pub const DETAILS_TOO_LONG: &str = "Details must be 1000 characters or less";
    pub const ALREADY_REPORTED: &str = "You have already reported this item";
    pub const TOO_MANY_REPORTS: &str = "Too many reports, try again later";
    pub const ITEM_NOT_FOUND: &str = "Item not found";
    pub const NOT_ITEM_OWNER: &str = "You can only award points for your own items";
    pub const NOT_GIVEN: &str = "Item must be marked as given first";
    pub const AWARD_FAILED: &str = "Failed to award points";
    pub const NOT_FOUND: &str = "Not found";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    pub const TIMEOUT: &str = "Request timed out";
    pub const INTERNAL: &str = "Internal server error";
}

/// HTTP error with a generic, client-safe message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
    /// Seconds until a throttled caller may retry
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            retry_after: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, messages::UNAUTHORIZED)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: &'static str) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn payload_too_large() -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, messages::BODY_TOO_LARGE)
    }

    /// 429 with a `Retry-After` rounded up to whole seconds.
    pub fn rate_limited(retry_after: Duration) -> Self {
        let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        Self {
            retry_after: Some(secs.max(1)),
            ..Self::new(StatusCode::TOO_MANY_REQUESTS, messages::TOO_MANY_REPORTS)
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        HTTP_ERRORS
            .with_label_values(&[self.status.as_str()])
            .inc();

        let body = ErrorBody {
            success: false,
            error: self.message,
        };
        let mut response = (self.status, Json(body)).into_response();
        if let Some(secs) = self.retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
