//! Interaction Service
//!
//! Implements `InteractionApi` on top of an injected `InteractionStore`.

use async_trait::async_trait;
use shared_types::{Caller, UserId};
use std::sync::Arc;
use tracing::debug;

use crate::domain::{InteractionEdge, InteractionError, InteractionKind, Subject, ToggleAction};
use crate::ports::{InteractionApi, InteractionStore};

/// Interaction Toggle Engine.
pub struct InteractionService<S: InteractionStore> {
    store: Arc<S>,
}

impl<S: InteractionStore> InteractionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn actor(caller: &Caller) -> Result<&UserId, InteractionError> {
        caller.user_id().ok_or(InteractionError::Unauthenticated)
    }

    fn subject(kind: InteractionKind, raw: &str) -> Result<Subject, InteractionError> {
        Subject::parse(kind, raw).map_err(|source| InteractionError::InvalidSubject {
            subject: kind.subject_type(),
            source,
        })
    }

    /// Resolves the caller and subject into the edge they address.
    fn edge(
        caller: &Caller,
        kind: InteractionKind,
        subject_id: &str,
    ) -> Result<InteractionEdge, InteractionError> {
        let actor = Self::actor(caller)?;
        let subject = Self::subject(kind, subject_id)?;
        Ok(InteractionEdge::new(kind, subject, actor.clone()))
    }

    fn reject_self_follow(edge: &InteractionEdge) -> Result<(), InteractionError> {
        if edge.is_self_follow() {
            return Err(InteractionError::SelfFollow);
        }
        Ok(())
    }
}

#[async_trait]
impl<S: InteractionStore + 'static> InteractionApi for InteractionService<S> {
    async fn toggle(
        &self,
        caller: &Caller,
        kind: InteractionKind,
        subject_id: &str,
    ) -> Result<ToggleAction, InteractionError> {
        let edge = Self::edge(caller, kind, subject_id)?;
        Self::reject_self_follow(&edge)?;

        if self.store.edge_exists(&edge).await? {
            // A concurrent remove may have won; the edge is off either way.
            self.store.delete_edge(&edge).await?;
            debug!(kind = %kind, subject = edge.subject.id(), actor = %edge.actor, "interaction removed");
            return Ok(ToggleAction::Removed);
        }

        match self.store.insert_edge(&edge).await {
            Ok(()) => {}
            Err(e) if e.is_conflict() => {
                debug!(kind = %kind, subject = edge.subject.id(), actor = %edge.actor, "concurrent insert, edge already on");
            }
            Err(e) => return Err(e.into()),
        }
        debug!(kind = %kind, subject = edge.subject.id(), actor = %edge.actor, "interaction added");
        Ok(ToggleAction::Added)
    }

    async fn remove(
        &self,
        caller: &Caller,
        kind: InteractionKind,
        subject_id: &str,
    ) -> Result<(), InteractionError> {
        let edge = Self::edge(caller, kind, subject_id)?;
        let existed = self.store.delete_edge(&edge).await?;
        debug!(kind = %kind, subject = edge.subject.id(), actor = %edge.actor, existed, "interaction remove");
        Ok(())
    }

    async fn follow(&self, caller: &Caller, target_user_id: &str) -> Result<(), InteractionError> {
        let edge = Self::edge(caller, InteractionKind::Follow, target_user_id)?;
        Self::reject_self_follow(&edge)?;

        if self.store.edge_exists(&edge).await? {
            return Err(InteractionError::AlreadyFollowing);
        }
        match self.store.insert_edge(&edge).await {
            Ok(()) => {
                debug!(target = edge.subject.id(), actor = %edge.actor, "follow added");
                Ok(())
            }
            Err(e) if e.is_conflict() => Err(InteractionError::AlreadyFollowing),
            Err(e) => Err(e.into()),
        }
    }

    async fn is_active(
        &self,
        caller: &Caller,
        kind: InteractionKind,
        subject_id: &str,
    ) -> Result<bool, InteractionError> {
        let edge = Self::edge(caller, kind, subject_id)?;
        Ok(self.store.edge_exists(&edge).await?)
    }

    async fn count(&self, kind: InteractionKind, subject_id: &str) -> Result<u64, InteractionError> {
        let subject = Self::subject(kind, subject_id)?;
        Ok(self.store.count_edges(kind, &subject).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectType;
    use proptest::prelude::*;
    use shared_types::{IdError, StoreError};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// In-memory edge table with a unique key.
    #[derive(Default)]
    struct MockEdgeStore {
        edges: RwLock<HashSet<InteractionEdge>>,
        /// Makes the next `edge_exists` answer `false` regardless of state,
        /// simulating a read that lost a race with a concurrent insert.
        stale_read: AtomicBool,
        fail: AtomicBool,
    }

    impl MockEdgeStore {
        async fn len(&self) -> usize {
            self.edges.read().await.len()
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("connection reset".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl InteractionStore for MockEdgeStore {
        async fn edge_exists(&self, edge: &InteractionEdge) -> Result<bool, StoreError> {
            self.check()?;
            if self.stale_read.swap(false, Ordering::SeqCst) {
                return Ok(false);
            }
            Ok(self.edges.read().await.contains(edge))
        }

        async fn insert_edge(&self, edge: &InteractionEdge) -> Result<(), StoreError> {
            self.check()?;
            if !self.edges.write().await.insert(edge.clone()) {
                return Err(StoreError::conflict("interaction_edges_pkey"));
            }
            Ok(())
        }

        async fn delete_edge(&self, edge: &InteractionEdge) -> Result<bool, StoreError> {
            self.check()?;
            Ok(self.edges.write().await.remove(edge))
        }

        async fn count_edges(
            &self,
            kind: InteractionKind,
            subject: &Subject,
        ) -> Result<u64, StoreError> {
            self.check()?;
            let edges = self.edges.read().await;
            Ok(edges
                .iter()
                .filter(|e| e.kind == kind && &e.subject == subject)
                .count() as u64)
        }
    }

    fn user(raw: &str) -> Caller {
        Caller::Authenticated(UserId::parse(raw).unwrap())
    }

    fn service() -> (Arc<MockEdgeStore>, InteractionService<MockEdgeStore>) {
        let store = Arc::new(MockEdgeStore::default());
        (store.clone(), InteractionService::new(store))
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let (store, svc) = service();
        let alice = user("alice");

        let first = svc.toggle(&alice, InteractionKind::Like, "item-1").await;
        assert_eq!(first, Ok(ToggleAction::Added));
        assert_eq!(store.len().await, 1);

        let second = svc.toggle(&alice, InteractionKind::Like, "item-1").await;
        assert_eq!(second, Ok(ToggleAction::Removed));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_checked_before_subject() {
        let (store, svc) = service();

        let result = svc.toggle(&Caller::Anonymous, InteractionKind::Save, "").await;
        assert_eq!(result, Err(InteractionError::Unauthenticated));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_missing_subject_rejected() {
        let (_, svc) = service();

        let result = svc.toggle(&user("alice"), InteractionKind::Share, "  ").await;
        assert_eq!(
            result,
            Err(InteractionError::InvalidSubject {
                subject: SubjectType::Item,
                source: IdError::Missing,
            })
        );
    }

    #[tokio::test]
    async fn test_conflicting_insert_reports_added() {
        let (store, svc) = service();
        let alice = user("alice");

        svc.toggle(&alice, InteractionKind::Like, "item-1").await.unwrap();
        // The next existence check misses the edge, so the engine inserts
        // and hits the unique key.
        store.stale_read.store(true, Ordering::SeqCst);

        let result = svc.toggle(&alice, InteractionKind::Like, "item-1").await;
        assert_eq!(result, Ok(ToggleAction::Added));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (store, svc) = service();
        store.fail.store(true, Ordering::SeqCst);

        let result = svc.toggle(&user("alice"), InteractionKind::Like, "item-1").await;
        assert!(matches!(result, Err(InteractionError::Store(_))));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (store, svc) = service();
        let alice = user("alice");

        assert_eq!(svc.remove(&alice, InteractionKind::Save, "item-1").await, Ok(()));

        svc.toggle(&alice, InteractionKind::Save, "item-1").await.unwrap();
        assert_eq!(svc.remove(&alice, InteractionKind::Save, "item-1").await, Ok(()));
        assert_eq!(svc.remove(&alice, InteractionKind::Save, "item-1").await, Ok(()));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_self_follow_rejected_regardless_of_state() {
        let (store, svc) = service();
        let alice = user("alice");

        assert_eq!(
            svc.toggle(&alice, InteractionKind::Follow, "alice").await,
            Err(InteractionError::SelfFollow)
        );
        assert_eq!(svc.follow(&alice, "alice").await, Err(InteractionError::SelfFollow));

        // Even with an edge somehow present, self-follow is refused.
        store.edges.write().await.insert(InteractionEdge::new(
            InteractionKind::Follow,
            Subject::User(UserId::parse("alice").unwrap()),
            UserId::parse("alice").unwrap(),
        ));
        assert_eq!(
            svc.toggle(&alice, InteractionKind::Follow, "alice").await,
            Err(InteractionError::SelfFollow)
        );
    }

    #[tokio::test]
    async fn test_strict_follow() {
        let (_, svc) = service();
        let alice = user("alice");

        assert_eq!(svc.follow(&alice, "bob").await, Ok(()));
        assert_eq!(
            svc.follow(&alice, "bob").await,
            Err(InteractionError::AlreadyFollowing)
        );
        assert_eq!(svc.is_active(&alice, InteractionKind::Follow, "bob").await, Ok(true));
        assert_eq!(svc.count(InteractionKind::Follow, "bob").await, Ok(1));
    }

    #[tokio::test]
    async fn test_strict_follow_conflict_is_already_following() {
        let (store, svc) = service();
        let alice = user("alice");

        svc.follow(&alice, "bob").await.unwrap();
        store.stale_read.store(true, Ordering::SeqCst);

        assert_eq!(
            svc.follow(&alice, "bob").await,
            Err(InteractionError::AlreadyFollowing)
        );
    }

    #[tokio::test]
    async fn test_counts_are_per_kind_and_subject() {
        let (_, svc) = service();

        svc.toggle(&user("alice"), InteractionKind::Like, "item-1").await.unwrap();
        svc.toggle(&user("bob"), InteractionKind::Like, "item-1").await.unwrap();
        svc.toggle(&user("bob"), InteractionKind::Save, "item-1").await.unwrap();
        svc.toggle(&user("bob"), InteractionKind::Like, "item-2").await.unwrap();

        assert_eq!(svc.count(InteractionKind::Like, "item-1").await, Ok(2));
        assert_eq!(svc.count(InteractionKind::Save, "item-1").await, Ok(1));
        assert_eq!(svc.count(InteractionKind::Share, "item-1").await, Ok(0));
        assert_eq!(
            svc.is_active(&user("alice"), InteractionKind::Save, "item-1").await,
            Ok(false)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_never_duplicate() {
        let (store, svc) = service();
        let svc = Arc::new(svc);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.toggle(&user("alice"), InteractionKind::Like, "item-1").await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert!(store.len().await <= 1);
    }

    proptest! {
        #[test]
        fn prop_toggle_parity(n in 1usize..24, kind_idx in 0usize..3) {
            let kind = InteractionKind::ALL[kind_idx];
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let (last, len) = runtime.block_on(async {
                let (store, svc) = service();
                let mut last = None;
                for _ in 0..n {
                    last = Some(svc.toggle(&user("alice"), kind, "item-1").await.unwrap());
                }
                (last, store.len().await)
            });

            let expected = if n % 2 == 1 { ToggleAction::Added } else { ToggleAction::Removed };
            prop_assert_eq!(last, Some(expected));
            prop_assert_eq!(len, n % 2);
        }
    }
}
