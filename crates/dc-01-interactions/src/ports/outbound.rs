//! Outbound (Driven) ports for the Interaction Toggle Engine.

use async_trait::async_trait;
use shared_types::StoreError;

use crate::domain::{InteractionEdge, InteractionKind, Subject};

/// The interaction edge table.
///
/// Each method is a single atomic store operation. The store enforces the
/// unique key `(kind, subject, actor)`.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn edge_exists(&self, edge: &InteractionEdge) -> Result<bool, StoreError>;

    /// Inserts the edge.
    ///
    /// # Errors
    /// - `StoreError::Conflict` when the edge already exists
    async fn insert_edge(&self, edge: &InteractionEdge) -> Result<(), StoreError>;

    /// Deletes the edge and reports whether it existed.
    async fn delete_edge(&self, edge: &InteractionEdge) -> Result<bool, StoreError>;

    async fn count_edges(&self, kind: InteractionKind, subject: &Subject)
        -> Result<u64, StoreError>;
}
