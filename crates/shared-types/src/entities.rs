//! # Core Domain Entities
//!
//! Identifiers and the read-only item model consumed by the engines.
//!
//! ## Clusters
//!
//! - **Identity**: `UserId`, `ItemId`
//! - **Listings**: `Item`, `ItemStatus` (owned by the external listing
//!   subsystem, read-only here)

use crate::errors::IdError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Longest accepted identifier, in bytes.
pub const MAX_ID_LEN: usize = 128;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Checks the shape shared by every opaque identifier and returns the
/// trimmed form.
fn validate_id(raw: &str) -> Result<&str, IdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Missing);
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(IdError::TooLong {
            len: trimmed.len(),
            max: MAX_ID_LEN,
        });
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(IdError::InvalidCharacter);
    }
    Ok(trimmed)
}

/// Identifier of a platform user (actor, reporter, item owner, follow target).
///
/// Deserialization goes through [`UserId::parse`], so seed files and stored
/// rows obey the same rules as request input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parses and normalizes a raw user id.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        validate_id(raw).map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a listed item.
///
/// Deserialization goes through [`ItemId::parse`], so seed files and stored
/// rows obey the same rules as request input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Parses and normalizes a raw item id.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        validate_id(raw).map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = IdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// LISTINGS
// =============================================================================

/// Lifecycle status of a listed item.
///
/// Statuses this core does not know about are kept verbatim in `Other` so a
/// listing subsystem can add states without breaking deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    Available,
    Reserved,
    Given,
    Archived,
    Other(String),
}

impl ItemStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Given => "given",
            Self::Archived => "archived",
            Self::Other(status) => status,
        }
    }

    /// Whether the donation has been handed over.
    pub fn is_given(&self) -> bool {
        matches!(self, Self::Given)
    }
}

impl From<String> for ItemStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Self::Available,
            "reserved" => Self::Reserved,
            "given" => Self::Given,
            "archived" => Self::Archived,
            _ => Self::Other(raw),
        }
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listed item, as read from the listing subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub owner_id: UserId,
    pub status: ItemStatus,
    /// NGO campaign the item was donated to, if any.
    #[serde(default)]
    pub campaign_id: Option<String>,
}

impl Item {
    pub fn new(id: ItemId, owner_id: UserId, status: ItemStatus) -> Self {
        Self {
            id,
            owner_id,
            status,
            campaign_id: None,
        }
    }

    pub fn with_campaign(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }
}
