//! # Inbound Port - InteractionApi

use async_trait::async_trait;
use shared_types::Caller;

use crate::domain::{InteractionError, InteractionKind, ToggleAction};

/// Primary API of the Interaction Toggle Engine.
///
/// Subject ids arrive raw from the transport and are validated here, after
/// the caller check.
#[async_trait]
pub trait InteractionApi: Send + Sync {
    /// Flips the `(kind, subject, actor)` edge.
    ///
    /// # Errors
    /// - `Unauthenticated`: no actor resolved
    /// - `InvalidSubject`: missing or malformed subject id
    /// - `SelfFollow`: `Follow` targeting the actor
    /// - `Store`: backend failure (a duplicate insert is not an error)
    async fn toggle(
        &self,
        caller: &Caller,
        kind: InteractionKind,
        subject_id: &str,
    ) -> Result<ToggleAction, InteractionError>;

    /// Deletes the edge. Succeeds when no edge existed.
    async fn remove(
        &self,
        caller: &Caller,
        kind: InteractionKind,
        subject_id: &str,
    ) -> Result<(), InteractionError>;

    /// Strict follow: creates the edge or fails with `AlreadyFollowing`.
    async fn follow(&self, caller: &Caller, target_user_id: &str) -> Result<(), InteractionError>;

    /// Whether the caller currently has the edge.
    async fn is_active(
        &self,
        caller: &Caller,
        kind: InteractionKind,
        subject_id: &str,
    ) -> Result<bool, InteractionError>;

    /// Number of live edges of `kind` on the subject.
    async fn count(&self, kind: InteractionKind, subject_id: &str) -> Result<u64, InteractionError>;
}
