//! Error types for the Points Award Engine.

use shared_types::{IdError, ItemStatus, StoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointsError {
    #[error("no authenticated giver")]
    Unauthenticated,

    #[error("invalid item id: {0}")]
    InvalidItem(IdError),

    #[error("item not found")]
    NotFound,

    #[error("caller does not own the item")]
    Forbidden,

    #[error("item must be marked as given first (status: {status})")]
    InvalidState { status: ItemStatus },

    /// The award procedure failed. Not retried.
    #[error("award procedure failed: {0}")]
    AwardFailed(StoreError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
