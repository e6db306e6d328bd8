//! Ledger policy: points per donation and rank thresholds.
//!
//! Only the store's award procedure consults this.

use dc_03_points::PointsBalance;
use serde::{Deserialize, Serialize};
use shared_types::{Item, UserId};
use thiserror::Error;

/// Minimum points for a named rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankThreshold {
    pub name: String,
    pub min_points: u64,
}

impl RankThreshold {
    pub fn new(name: impl Into<String>, min_points: u64) -> Self {
        Self {
            name: name.into(),
            min_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerPolicyError {
    #[error("points_per_donation must be greater than zero")]
    ZeroPoints,

    #[error("at least one rank is required")]
    NoRanks,

    #[error("the lowest rank must start at 0 points")]
    NoBaseRank,

    #[error("rank thresholds must be strictly ascending (at {name})")]
    Unordered { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerPolicy {
    pub points_per_donation: u64,
    /// Extra points when the item was donated to an NGO campaign.
    pub campaign_bonus: u64,
    /// Ascending by `min_points`; the first starts at 0.
    pub ranks: Vec<RankThreshold>,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            points_per_donation: 10,
            campaign_bonus: 5,
            ranks: vec![
                RankThreshold::new("Newcomer", 0),
                RankThreshold::new("Helper", 50),
                RankThreshold::new("Giver", 150),
                RankThreshold::new("Champion", 500),
            ],
        }
    }
}

impl LedgerPolicy {
    pub fn validate(&self) -> Result<(), LedgerPolicyError> {
        if self.points_per_donation == 0 {
            return Err(LedgerPolicyError::ZeroPoints);
        }
        let first = self.ranks.first().ok_or(LedgerPolicyError::NoRanks)?;
        if first.min_points != 0 {
            return Err(LedgerPolicyError::NoBaseRank);
        }
        for pair in self.ranks.windows(2) {
            if pair[1].min_points <= pair[0].min_points {
                return Err(LedgerPolicyError::Unordered {
                    name: pair[1].name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Points credited for donating `item`.
    pub fn points_for(&self, item: &Item) -> u64 {
        let bonus = if item.campaign_id.is_some() {
            self.campaign_bonus
        } else {
            0
        };
        self.points_per_donation.saturating_add(bonus)
    }

    /// Highest rank whose threshold `points` reaches.
    pub fn rank_for(&self, points: u64) -> &str {
        self.ranks
            .iter()
            .rev()
            .find(|r| points >= r.min_points)
            .map_or("", |r| r.name.as_str())
    }

    pub fn balance(&self, user: &UserId, row: BalanceRow) -> PointsBalance {
        PointsBalance {
            user_id: user.clone(),
            points: row.points,
            donations: row.donations,
            rank: self.rank_for(row.points).to_string(),
        }
    }
}

/// Persisted running totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub points: u64,
    pub donations: u64,
}

impl BalanceRow {
    pub fn credit(self, points: u64) -> Self {
        Self {
            points: self.points.saturating_add(points),
            donations: self.donations.saturating_add(1),
        }
    }
}
