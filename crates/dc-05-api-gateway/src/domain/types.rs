//! Request and response bodies.
//!
//! Request fields are all optional so a missing field surfaces as the
//! engine's own validation error rather than a deserialization failure.

use dc_02_reports::{ItemReportSubmission, ReportSubmission};
use serde::{Deserialize, Serialize};

// =============================================================================
// REQUESTS
// =============================================================================

/// `{itemId}` body or `?itemId=` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub item_id: Option<String>,
}

/// `{userId}` body or `?userId=` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub reported_item_id: Option<String>,
    pub reported_user_id: Option<String>,
    pub reason: Option<String>,
    pub details: Option<String>,
}

impl From<ReportRequest> for ReportSubmission {
    fn from(req: ReportRequest) -> Self {
        Self {
            reported_item_id: req.reported_item_id,
            reported_user_id: req.reported_user_id,
            reason: req.reason,
            details: req.details,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReportRequest {
    pub item_id: Option<String>,
    pub reason: Option<String>,
    pub details: Option<String>,
}

impl From<ItemReportRequest> for ItemReportSubmission {
    fn from(req: ItemReportRequest) -> Self {
        Self {
            item_id: req.item_id,
            reason: req.reason,
            details: req.details,
        }
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Result of a toggle: `liked`/`unliked`, `saved`/`unsaved`, ...
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractionStateResponse {
    pub success: bool,
    pub active: bool,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowStateResponse {
    pub success: bool,
    pub following: bool,
    pub followers: u64,
}

/// `awarded` is false when the item had already paid out.
#[derive(Debug, Clone, Serialize)]
pub struct AwardResponse {
    pub success: bool,
    pub awarded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub success: bool,
    pub points: u64,
    pub donations: u64,
    pub rank: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
