//! Gives transport-level rejections the gateway's JSON error shape.
//!
//! The body limit, the request timeout and the method router answer on
//! their own with plain-text or empty bodies. Those responses are rebuilt
//! as [`ApiError`]s; everything else passes through untouched.

use crate::domain::error::messages;
use crate::domain::ApiError;
use axum::body::{Bytes, HttpBody};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::BoxError;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn transport_message(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => Some(messages::BODY_TOO_LARGE),
        StatusCode::REQUEST_TIMEOUT => Some(messages::TIMEOUT),
        StatusCode::METHOD_NOT_ALLOWED => Some(messages::METHOD_NOT_ALLOWED),
        _ => None,
    }
}

/// Response mapper for `ServiceBuilder::map_response`.
pub fn json_error_response<B>(response: Response<B>) -> Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let message = match transport_message(response.status()) {
        Some(message) if !is_json(response.headers()) => message,
        _ => return response.into_response(),
    };

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut shaped = ApiError::new(response.status(), message).into_response();
    if let Some(allow) = allow {
        shaped.headers_mut().insert(header::ALLOW, allow);
    }
    shaped
}
