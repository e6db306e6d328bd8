//! Points routes.

use super::{parse_body, AppState, RawBody};
use crate::domain::{ApiError, ApiResult, AwardResponse, BalanceResponse, ItemRef};
use axum::extract::State;
use axum::{Extension, Json};
use dc_03_points::PointsError;
use dc_telemetry::{metric_inc, HistogramTimer, POINTS_AWARDS};
use shared_types::Caller;

/// Awards the caller for a given item. Repeats answer `awarded: false`.
pub async fn award(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: RawBody,
) -> ApiResult<Json<AwardResponse>> {
    let _timer = HistogramTimer::route("/points/award");
    let req: ItemRef = parse_body(&caller, body)?;
    let item_id = req.item_id.unwrap_or_default();

    match state.points.award_for_item(&caller, &item_id).await {
        Ok(outcome) => {
            metric_inc!(POINTS_AWARDS, &[outcome.as_str()]);
            Ok(Json(AwardResponse {
                success: true,
                awarded: outcome.awarded(),
            }))
        }
        Err(e) => {
            if matches!(e, PointsError::AwardFailed(_)) {
                metric_inc!(POINTS_AWARDS, &["failed"]);
            }
            Err(ApiError::from(e))
        }
    }
}

pub async fn balance(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<BalanceResponse>> {
    let _timer = HistogramTimer::route("/points/balance");
    let balance = state.points.balance(&caller).await?;
    Ok(Json(BalanceResponse {
        success: true,
        points: balance.points,
        donations: balance.donations,
        rank: balance.rank,
    }))
}
