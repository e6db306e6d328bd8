//! Like, save, share and follow routes.

use super::{parse_body, parse_query, AppState, RawBody};
use crate::domain::{
    ApiResult, FollowStateResponse, InteractionStateResponse, ItemRef, SuccessResponse,
    ToggleResponse, UserRef,
};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use dc_01_interactions::InteractionKind;
use dc_telemetry::{metric_inc, HistogramTimer, INTERACTIONS};
use shared_types::Caller;

type ItemQuery = Result<Query<ItemRef>, QueryRejection>;
type UserQuery = Result<Query<UserRef>, QueryRejection>;

async fn toggle(
    state: &AppState,
    caller: &Caller,
    kind: InteractionKind,
    body: RawBody,
) -> ApiResult<Json<ToggleResponse>> {
    let req: ItemRef = parse_body(caller, body)?;
    let item_id = req.item_id.unwrap_or_default();

    let action = state.interactions.toggle(caller, kind, &item_id).await?;
    metric_inc!(INTERACTIONS, &[kind.as_str(), action.as_str()]);

    Ok(Json(ToggleResponse {
        success: true,
        action: action.label(kind),
    }))
}

async fn remove(
    state: &AppState,
    caller: &Caller,
    kind: InteractionKind,
    subject_id: Option<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let subject_id = subject_id.unwrap_or_default();
    state.interactions.remove(caller, kind, &subject_id).await?;
    metric_inc!(INTERACTIONS, &[kind.as_str(), "deleted"]);
    Ok(Json(SuccessResponse::ok()))
}

async fn item_state(
    state: &AppState,
    caller: &Caller,
    kind: InteractionKind,
    query: ItemQuery,
) -> ApiResult<Json<InteractionStateResponse>> {
    let item_id = parse_query(caller, query)?.item_id.unwrap_or_default();
    let active = state.interactions.is_active(caller, kind, &item_id).await?;
    let count = state.interactions.count(kind, &item_id).await?;
    Ok(Json(InteractionStateResponse {
        success: true,
        active,
        count,
    }))
}

// =============================================================================
// LIKE
// =============================================================================

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: RawBody,
) -> ApiResult<Json<ToggleResponse>> {
    let _timer = HistogramTimer::route("/interactions/like");
    toggle(&state, &caller, InteractionKind::Like, body).await
}

pub async fn remove_like(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: ItemQuery,
) -> ApiResult<Json<SuccessResponse>> {
    let _timer = HistogramTimer::route("/interactions/like");
    let item_id = parse_query(&caller, query)?.item_id;
    remove(&state, &caller, InteractionKind::Like, item_id).await
}

pub async fn like_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: ItemQuery,
) -> ApiResult<Json<InteractionStateResponse>> {
    let _timer = HistogramTimer::route("/interactions/like");
    item_state(&state, &caller, InteractionKind::Like, query).await
}

// =============================================================================
// SAVE
// =============================================================================

pub async fn toggle_save(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: RawBody,
) -> ApiResult<Json<ToggleResponse>> {
    let _timer = HistogramTimer::route("/interactions/save");
    toggle(&state, &caller, InteractionKind::Save, body).await
}

pub async fn remove_save(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: ItemQuery,
) -> ApiResult<Json<SuccessResponse>> {
    let _timer = HistogramTimer::route("/interactions/save");
    let item_id = parse_query(&caller, query)?.item_id;
    remove(&state, &caller, InteractionKind::Save, item_id).await
}

pub async fn save_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: ItemQuery,
) -> ApiResult<Json<InteractionStateResponse>> {
    let _timer = HistogramTimer::route("/interactions/save");
    item_state(&state, &caller, InteractionKind::Save, query).await
}

// =============================================================================
// SHARE (no DELETE route; a second POST unshares)
// =============================================================================

pub async fn toggle_share(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: RawBody,
) -> ApiResult<Json<ToggleResponse>> {
    let _timer = HistogramTimer::route("/interactions/share");
    toggle(&state, &caller, InteractionKind::Share, body).await
}

pub async fn share_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: ItemQuery,
) -> ApiResult<Json<InteractionStateResponse>> {
    let _timer = HistogramTimer::route("/interactions/share");
    item_state(&state, &caller, InteractionKind::Share, query).await
}

// =============================================================================
// FOLLOW
// =============================================================================

/// Strict follow: a second POST is "Already following this user".
pub async fn follow(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: RawBody,
) -> ApiResult<Json<SuccessResponse>> {
    let _timer = HistogramTimer::route("/interactions/follow");
    let req: UserRef = parse_body(&caller, body)?;
    let user_id = req.user_id.unwrap_or_default();

    state.interactions.follow(&caller, &user_id).await?;
    metric_inc!(INTERACTIONS, &[InteractionKind::Follow.as_str(), "followed"]);
    Ok(Json(SuccessResponse::ok()))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: UserQuery,
) -> ApiResult<Json<SuccessResponse>> {
    let _timer = HistogramTimer::route("/interactions/follow");
    let user_id = parse_query(&caller, query)?.user_id;
    remove(&state, &caller, InteractionKind::Follow, user_id).await
}

/// Whether the caller follows `userId`, and that user's follower count.
pub async fn follow_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: UserQuery,
) -> ApiResult<Json<FollowStateResponse>> {
    let _timer = HistogramTimer::route("/interactions/follow");
    let user_id = parse_query(&caller, query)?.user_id.unwrap_or_default();
    let kind = InteractionKind::Follow;
    let following = state.interactions.is_active(&caller, kind, &user_id).await?;
    let followers = state.interactions.count(kind, &user_id).await?;
    Ok(Json(FollowStateResponse {
        success: true,
        following,
        followers,
    }))
}
