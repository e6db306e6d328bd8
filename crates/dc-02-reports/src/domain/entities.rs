//! Report entities and the reason taxonomy.

use serde::{Deserialize, Serialize};
use shared_types::{ItemId, Timestamp, UserId};
use std::fmt;
use uuid::Uuid;

/// Longest accepted reason, in characters.
pub const MAX_REASON_CHARS: usize = 100;

/// Longest accepted details text, in characters.
pub const MAX_DETAILS_CHARS: usize = 1000;

/// Fixed reason taxonomy of the generic report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportReason {
    FakeOrMisleading,
    Stolen,
    ScamOrFraud,
    Inappropriate,
    HateOrHarassment,
    DangerousOrIllegal,
    DuplicateOrSpam,
    Impersonation,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 9] = [
        Self::FakeOrMisleading,
        Self::Stolen,
        Self::ScamOrFraud,
        Self::Inappropriate,
        Self::HateOrHarassment,
        Self::DangerousOrIllegal,
        Self::DuplicateOrSpam,
        Self::Impersonation,
        Self::Other,
    ];

    /// Label shown to users and stored on the report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FakeOrMisleading => "Fake or misleading item",
            Self::Stolen => "Stolen item",
            Self::ScamOrFraud => "Scam or fraud attempt",
            Self::Inappropriate => "Inappropriate content",
            Self::HateOrHarassment => "Hate or harassment",
            Self::DangerousOrIllegal => "Dangerous or illegal item",
            Self::DuplicateOrSpam => "Duplicate or spam listing",
            Self::Impersonation => "Impersonation",
            Self::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup of a trimmed label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == label)
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a report is filed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportTarget {
    Item(ItemId),
    User(UserId),
}

impl ReportTarget {
    pub fn item(&self) -> Option<&ItemId> {
        match self {
            Self::Item(id) => Some(id),
            Self::User(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::User(_) => "user",
        }
    }
}

/// A persisted report. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub reporter: UserId,
    pub target: ReportTarget,
    pub reason: String,
    pub details: Option<String>,
    pub created_at: Timestamp,
}

/// Raw generic report form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSubmission {
    pub reported_item_id: Option<String>,
    pub reported_user_id: Option<String>,
    pub reason: Option<String>,
    pub details: Option<String>,
}

/// Raw item-specific report form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemReportSubmission {
    pub item_id: Option<String>,
    pub reason: Option<String>,
    pub details: Option<String>,
}

/// Outcome of a generic submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new report row was written.
    Recorded,
    /// The reporter already reported this item; nothing was written.
    AlreadyReported,
}

impl SubmitOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recorded => "recorded",
            Self::AlreadyReported => "already_reported",
        }
    }
}
