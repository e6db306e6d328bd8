//! # Inbound Port - PointsApi

use async_trait::async_trait;
use shared_types::Caller;

use crate::domain::{AwardOutcome, PointsBalance, PointsError};

#[async_trait]
pub trait PointsApi: Send + Sync {
    /// Credits the caller for donating `item_id`, at most once per item.
    ///
    /// # Errors
    /// - `Unauthenticated`: no caller
    /// - `InvalidItem`: missing or malformed item id
    /// - `NotFound`, `Forbidden`, `InvalidState`: gate failures, in that order
    /// - `AwardFailed`: the store procedure failed
    async fn award_for_item(
        &self,
        caller: &Caller,
        item_id: &str,
    ) -> Result<AwardOutcome, PointsError>;

    /// The caller's points, donations and rank.
    async fn balance(&self, caller: &Caller) -> Result<PointsBalance, PointsError>;
}
