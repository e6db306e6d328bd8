//! Award outcomes and the points read model.

use serde::{Deserialize, Serialize};
use shared_types::{ItemId, Timestamp, UserId};

/// Result of the store's award procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardOutcome {
    /// First award for the item; the giver was credited.
    Credited { points: u64 },
    /// The item was already paid out; nothing changed.
    AlreadyAwarded,
}

impl AwardOutcome {
    /// Whether this call credited the giver.
    pub fn awarded(&self) -> bool {
        matches!(self, Self::Credited { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credited { .. } => "credited",
            Self::AlreadyAwarded => "already_awarded",
        }
    }
}

/// A user's accumulated points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBalance {
    pub user_id: UserId,
    pub points: u64,
    /// Number of credited donations.
    pub donations: u64,
    pub rank: String,
}

/// One paid-out item. Primary key `item_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardRecord {
    pub item_id: ItemId,
    pub giver_id: UserId,
    pub points: u64,
    #[serde(default)]
    pub campaign_id: Option<String>,
    pub awarded_at: Timestamp,
}
