//! Submission validation.
//!
//! Pure functions; the first failing rule wins. Nothing here touches the
//! store or the rate limiter.

use shared_types::{ItemId, UserId};

use super::entities::{
    ItemReportSubmission, ReportReason, ReportSubmission, ReportTarget, MAX_DETAILS_CHARS,
    MAX_REASON_CHARS,
};
use super::errors::InvalidReport;

/// A submission that passed validation, with trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReport {
    pub target: ReportTarget,
    pub reason: String,
    pub details: Option<String>,
}

/// Trims and drops blank optional text.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn check_reason_length(reason: &str) -> Result<(), InvalidReport> {
    let len = reason.chars().count();
    if len > MAX_REASON_CHARS {
        return Err(InvalidReport::ReasonTooLong {
            len,
            max: MAX_REASON_CHARS,
        });
    }
    Ok(())
}

fn check_details_length(details: Option<&str>) -> Result<(), InvalidReport> {
    let len = details.map_or(0, |d| d.chars().count());
    if len > MAX_DETAILS_CHARS {
        return Err(InvalidReport::DetailsTooLong {
            len,
            max: MAX_DETAILS_CHARS,
        });
    }
    Ok(())
}

fn require_details_for_other(reason: &str, details: Option<&str>) -> Result<(), InvalidReport> {
    if reason == ReportReason::Other.as_str() && details.is_none() {
        return Err(InvalidReport::DetailsRequired);
    }
    Ok(())
}

/// Validates a generic report form.
///
/// Order: reason, target, `Other` details, details length.
pub fn validate_generic(submission: &ReportSubmission) -> Result<ValidatedReport, InvalidReport> {
    let reason = present(submission.reason.as_deref()).ok_or(InvalidReport::MissingReason)?;
    check_reason_length(reason)?;
    let reason = ReportReason::from_label(reason).ok_or(InvalidReport::UnknownReason)?;

    let item = present(submission.reported_item_id.as_deref());
    let user = present(submission.reported_user_id.as_deref());
    let target = match (item, user) {
        (Some(item), None) => {
            ReportTarget::Item(ItemId::parse(item).map_err(InvalidReport::InvalidTarget)?)
        }
        (None, Some(user)) => {
            ReportTarget::User(UserId::parse(user).map_err(InvalidReport::InvalidTarget)?)
        }
        (None, None) => return Err(InvalidReport::MissingTarget),
        (Some(_), Some(_)) => return Err(InvalidReport::AmbiguousTarget),
    };

    let details = present(submission.details.as_deref());
    require_details_for_other(reason.as_str(), details)?;
    check_details_length(details)?;

    Ok(ValidatedReport {
        target,
        reason: reason.as_str().to_string(),
        details: details.map(str::to_string),
    })
}

/// Validates an item-specific report form.
///
/// Order: item id, reason presence, lengths, `Other` details. The reason is
/// free text on this path.
pub fn validate_item(submission: &ItemReportSubmission) -> Result<ValidatedReport, InvalidReport> {
    let item = present(submission.item_id.as_deref()).ok_or(InvalidReport::MissingTarget)?;
    let item = ItemId::parse(item).map_err(InvalidReport::InvalidTarget)?;
    let reason = present(submission.reason.as_deref()).ok_or(InvalidReport::MissingReason)?;

    let details = present(submission.details.as_deref());
    check_reason_length(reason)?;
    check_details_length(details)?;
    require_details_for_other(reason, details)?;

    Ok(ValidatedReport {
        target: ReportTarget::Item(item),
        reason: reason.to_string(),
        details: details.map(str::to_string),
    })
}
