//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Malformed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Id absent or blank.
    #[error("identifier is missing")]
    Missing,

    /// Id longer than the accepted maximum.
    #[error("identifier is {len} bytes, maximum is {max}")]
    TooLong { len: usize, max: usize },

    /// Id contains whitespace or control characters.
    #[error("identifier contains invalid characters")]
    InvalidCharacter,
}

/// Errors surfaced by the persistent store.
///
/// Messages may carry backend detail. They are logged, never returned to
/// clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    Conflict { constraint: String },

    /// The store procedure expected a row that is not there.
    #[error("row not found: {0}")]
    NotFound(String),

    /// The store procedure refused the operation after re-validating it.
    #[error("procedure rejected: {0}")]
    Rejected(String),

    /// Backend failure (I/O, connection, lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A persisted record could not be decoded.
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn conflict(constraint: impl Into<String>) -> Self {
        Self::Conflict {
            constraint: constraint.into(),
        }
    }

    /// Whether the store rejected a duplicate insert.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
