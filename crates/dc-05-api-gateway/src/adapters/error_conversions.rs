//! Engine error → HTTP error mapping.
//!
//! Store failures are logged here with full detail and leave as a generic 500.

use crate::domain::error::messages;
use crate::domain::ApiError;
use dc_01_interactions::{InteractionError, SubjectType};
use dc_02_reports::{InvalidReport, ReportError};
use dc_03_points::PointsError;
use shared_types::IdError;
use tracing::{error, warn};

fn item_id_error(e: &IdError) -> ApiError {
    match e {
        IdError::Missing => ApiError::bad_request(messages::ITEM_ID_REQUIRED),
        _ => ApiError::bad_request(messages::INVALID_ITEM_ID),
    }
}

fn user_id_error(e: &IdError) -> ApiError {
    match e {
        IdError::Missing => ApiError::bad_request(messages::USER_ID_REQUIRED),
        _ => ApiError::bad_request(messages::INVALID_USER_ID),
    }
}

impl From<InteractionError> for ApiError {
    fn from(e: InteractionError) -> Self {
        match e {
            InteractionError::Unauthenticated => ApiError::unauthorized(),
            InteractionError::InvalidSubject {
                subject: SubjectType::Item,
                source,
            } => item_id_error(&source),
            InteractionError::InvalidSubject {
                subject: SubjectType::User,
                source,
            } => user_id_error(&source),
            InteractionError::SelfFollow => ApiError::bad_request(messages::SELF_FOLLOW),
            InteractionError::AlreadyFollowing => {
                ApiError::bad_request(messages::ALREADY_FOLLOWING)
            }
            InteractionError::Store(store) => {
                error!(error = %store, "interaction store failure");
                ApiError::internal()
            }
        }
    }
}

impl From<InvalidReport> for ApiError {
    fn from(e: InvalidReport) -> Self {
        let message = match e {
            InvalidReport::MissingReason => messages::REASON_REQUIRED,
            InvalidReport::UnknownReason => messages::INVALID_REASON,
            InvalidReport::ReasonTooLong { .. } => messages::REASON_TOO_LONG,
            InvalidReport::MissingTarget => messages::TARGET_REQUIRED,
            InvalidReport::AmbiguousTarget => messages::AMBIGUOUS_TARGET,
            InvalidReport::InvalidTarget(_) => messages::INVALID_TARGET,
            InvalidReport::DetailsRequired => messages::DETAILS_REQUIRED,
            InvalidReport::DetailsTooLong { .. } => messages::DETAILS_TOO_LONG,
        };
        ApiError::bad_request(message)
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::Unauthenticated => ApiError::unauthorized(),
            ReportError::InvalidInput(invalid) => invalid.into(),
            ReportError::DuplicateReport => ApiError::bad_request(messages::ALREADY_REPORTED),
            ReportError::RateLimited { retry_after } => ApiError::rate_limited(retry_after),
            ReportError::Store(store) => {
                error!(error = %store, "report store failure");
                ApiError::internal()
            }
        }
    }
}

/// Item-form mapping: the only target is the item, so a missing or bad
/// target reads as an item id problem.
pub fn item_report_error(e: ReportError) -> ApiError {
    match e {
        ReportError::InvalidInput(InvalidReport::MissingTarget) => {
            ApiError::bad_request(messages::ITEM_ID_REQUIRED)
        }
        ReportError::InvalidInput(InvalidReport::InvalidTarget(id)) => item_id_error(&id),
        other => other.into(),
    }
}

impl From<PointsError> for ApiError {
    fn from(e: PointsError) -> Self {
        match e {
            PointsError::Unauthenticated => ApiError::unauthorized(),
            PointsError::InvalidItem(id) => item_id_error(&id),
            PointsError::NotFound => ApiError::not_found(messages::ITEM_NOT_FOUND),
            PointsError::Forbidden => ApiError::forbidden(messages::NOT_ITEM_OWNER),
            PointsError::InvalidState { status } => {
                warn!(%status, "award attempted before item was given");
                ApiError::bad_request(messages::NOT_GIVEN)
            }
            PointsError::AwardFailed(store) => {
                error!(error = %store, "award procedure failed");
                ApiError {
                    message: messages::AWARD_FAILED,
                    ..ApiError::internal()
                }
            }
            PointsError::Store(store) => {
                error!(error = %store, "points store failure");
                ApiError::internal()
            }
        }
    }
}
