//! Outbound (Driven) ports for the Points Award Engine.

use async_trait::async_trait;
use shared_types::{Item, ItemId, StoreError, UserId};

use crate::domain::{AwardOutcome, PointsBalance};

/// Read-only view of the listing subsystem's items.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;
}

/// The points ledger and its atomic award procedure.
#[async_trait]
pub trait PointsLedger: Send + Sync {
    /// Awards points for `item` to `giver` in one atomic step.
    ///
    /// The procedure re-checks ownership and status, is idempotent keyed by
    /// item id, and alone decides how many points a donation is worth.
    ///
    /// # Errors
    /// - `StoreError::NotFound` / `StoreError::Rejected` when re-validation fails
    async fn award_points_for_item(
        &self,
        giver: &UserId,
        item: &ItemId,
    ) -> Result<AwardOutcome, StoreError>;

    /// Balance for `user`; zero with the lowest rank when never credited.
    async fn balance(&self, user: &UserId) -> Result<PointsBalance, StoreError>;
}
