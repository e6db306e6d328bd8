//! Error types for the Interaction Toggle Engine.

use super::entities::SubjectType;
use shared_types::{IdError, StoreError};
use thiserror::Error;

/// Errors that can occur while toggling or reading interactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("no authenticated actor")]
    Unauthenticated,

    #[error("invalid {} id: {source}", .subject.as_str())]
    InvalidSubject {
        subject: SubjectType,
        source: IdError,
    },

    #[error("a user cannot follow themselves")]
    SelfFollow,

    #[error("already following this user")]
    AlreadyFollowing,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
