//! Route handlers.
//!
//! Handlers parse the transport shape, call one engine, record metrics and
//! shape the response. Authorization and validation live in the engines;
//! the checks here only keep 401 ahead of 400 for malformed input.

pub mod health;
pub mod interactions;
pub mod points;
pub mod reports;

use crate::domain::error::messages;
use crate::domain::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use dc_01_interactions::InteractionApi;
use dc_02_reports::ReportApi;
use dc_03_points::PointsApi;
use serde::de::DeserializeOwned;
use shared_types::Caller;
use std::sync::Arc;
use tracing::debug;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub interactions: Arc<dyn InteractionApi>,
    pub reports: Arc<dyn ReportApi>,
    pub points: Arc<dyn PointsApi>,
}

impl AppState {
    pub fn new(
        interactions: Arc<dyn InteractionApi>,
        reports: Arc<dyn ReportApi>,
        points: Arc<dyn PointsApi>,
    ) -> Self {
        Self {
            interactions,
            reports,
            points,
        }
    }
}

fn require_session(caller: &Caller) -> ApiResult<()> {
    if caller.is_authenticated() {
        Ok(())
    } else {
        Err(ApiError::unauthorized())
    }
}

/// Raw request body. Buffering failures are kept so the session check
/// can run before they are reported.
pub type RawBody = Result<Bytes, BytesRejection>;

/// Parses a JSON body. An empty body reads as `{}`.
pub(crate) fn parse_body<T>(caller: &Caller, body: RawBody) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    require_session(caller)?;
    let bytes = body.map_err(|rejection| {
        debug!(error = %rejection, "failed to read request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large()
        } else {
            ApiError::bad_request(messages::INVALID_BODY)
        }
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!(error = %e, "malformed request body");
        ApiError::bad_request(messages::INVALID_BODY)
    })
}

pub(crate) fn parse_query<T>(
    caller: &Caller,
    query: Result<Query<T>, QueryRejection>,
) -> ApiResult<T> {
    require_session(caller)?;
    query.map(|Query(q)| q).map_err(|e| {
        debug!(error = %e, "malformed query string");
        ApiError::bad_request(messages::INVALID_QUERY)
    })
}
