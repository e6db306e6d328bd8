//! Report intake routes.
//!
//! `/reports` swallows a repeated item report; `/reports/item` rejects it.

use super::{parse_body, AppState, RawBody};
use crate::adapters::item_report_error;
use crate::domain::{ApiError, ApiResult, ItemReportRequest, ReportRequest, SuccessResponse};
use axum::extract::State;
use axum::{Extension, Json};
use dc_02_reports::ReportError;
use dc_telemetry::{metric_inc, HistogramTimer, REPORTS};
use shared_types::Caller;

fn failure_label(e: &ReportError) -> Option<&'static str> {
    match e {
        ReportError::DuplicateReport => Some("duplicate"),
        ReportError::RateLimited { .. } => Some("rate_limited"),
        _ => None,
    }
}

pub async fn submit_report(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: RawBody,
) -> ApiResult<Json<SuccessResponse>> {
    let _timer = HistogramTimer::route("/reports");
    let req: ReportRequest = parse_body(&caller, body)?;

    match state.reports.submit_report(&caller, req.into()).await {
        Ok(outcome) => {
            metric_inc!(REPORTS, &["generic", outcome.as_str()]);
            Ok(Json(SuccessResponse::ok()))
        }
        Err(e) => {
            if let Some(label) = failure_label(&e) {
                metric_inc!(REPORTS, &["generic", label]);
            }
            Err(ApiError::from(e))
        }
    }
}

pub async fn submit_item_report(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: RawBody,
) -> ApiResult<Json<SuccessResponse>> {
    let _timer = HistogramTimer::route("/reports/item");
    let req: ItemReportRequest = parse_body(&caller, body)?;

    match state.reports.submit_item_report(&caller, req.into()).await {
        Ok(()) => {
            metric_inc!(REPORTS, &["item", "recorded"]);
            Ok(Json(SuccessResponse::ok()))
        }
        Err(e) => {
            if let Some(label) = failure_label(&e) {
                metric_inc!(REPORTS, &["item", label]);
            }
            Err(item_report_error(e))
        }
    }
}
