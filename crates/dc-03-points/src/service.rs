//! Points Service
//!
//! Implements `PointsApi` over an `ItemCatalog` and a `PointsLedger`.

use async_trait::async_trait;
use shared_types::{Caller, Item, ItemId, UserId};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{AwardOutcome, PointsBalance, PointsError};
use crate::ports::{ItemCatalog, PointsApi, PointsLedger};

/// Points Award Engine.
pub struct PointsService<C: ItemCatalog, L: PointsLedger> {
    catalog: Arc<C>,
    ledger: Arc<L>,
}

impl<C: ItemCatalog, L: PointsLedger> PointsService<C, L> {
    pub fn new(catalog: Arc<C>, ledger: Arc<L>) -> Self {
        Self { catalog, ledger }
    }

    fn giver(caller: &Caller) -> Result<&UserId, PointsError> {
        caller.user_id().ok_or(PointsError::Unauthenticated)
    }

    /// Ownership then status. Ownership is checked first so a non-owner
    /// learns nothing about the item's status.
    fn check_gate(item: &Item, giver: &UserId) -> Result<(), PointsError> {
        if !item.is_owned_by(giver) {
            return Err(PointsError::Forbidden);
        }
        if !item.status.is_given() {
            return Err(PointsError::InvalidState {
                status: item.status.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<C, L> PointsApi for PointsService<C, L>
where
    C: ItemCatalog + 'static,
    L: PointsLedger + 'static,
{
    async fn award_for_item(
        &self,
        caller: &Caller,
        item_id: &str,
    ) -> Result<AwardOutcome, PointsError> {
        let giver = Self::giver(caller)?;
        let item_id = ItemId::parse(item_id).map_err(PointsError::InvalidItem)?;

        let item = self
            .catalog
            .get_item(&item_id)
            .await?
            .ok_or(PointsError::NotFound)?;
        Self::check_gate(&item, giver)?;

        let outcome = self
            .ledger
            .award_points_for_item(giver, &item_id)
            .await
            .map_err(|e| {
                warn!(item = %item_id, giver = %giver, error = %e, "award procedure failed");
                PointsError::AwardFailed(e)
            })?;

        info!(
            item = %item_id,
            giver = %giver,
            outcome = outcome.as_str(),
            "points award processed"
        );
        Ok(outcome)
    }

    async fn balance(&self, caller: &Caller) -> Result<PointsBalance, PointsError> {
        let user = Self::giver(caller)?;
        Ok(self.ledger.balance(user).await?)
    }
}
