//! Error types for the Report Intake Engine.

use shared_types::{IdError, StoreError};
use std::time::Duration;
use thiserror::Error;

/// Why a submission failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReport {
    #[error("reason is required")]
    MissingReason,

    #[error("reason is not part of the taxonomy")]
    UnknownReason,

    #[error("reason is {len} chars, maximum is {max}")]
    ReasonTooLong { len: usize, max: usize },

    #[error("either an item or a user must be reported")]
    MissingTarget,

    #[error("only one of item or user may be reported")]
    AmbiguousTarget,

    #[error("invalid report target: {0}")]
    InvalidTarget(IdError),

    #[error("details are required when the reason is Other")]
    DetailsRequired,

    #[error("details are {len} chars, maximum is {max}")]
    DetailsTooLong { len: usize, max: usize },
}

/// Errors that can occur while submitting a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no authenticated reporter")]
    Unauthenticated,

    #[error("invalid report: {0}")]
    InvalidInput(#[from] InvalidReport),

    #[error("item already reported by this user")]
    DuplicateReport,

    #[error("report rate limit exceeded, retry in {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
