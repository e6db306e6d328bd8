//! # Donation Flow
//!
//! A giver lists an item, marks it given and claims points. The store's
//! award procedure is the only thing standing between a retry and a second
//! credit.

#[cfg(test)]
mod tests {
    use crate::fixtures::{caller, item, user, Node};
    use dc_03_points::{AwardOutcome, PointsApi, PointsError};
    use dc_04_store::LedgerPolicy;
    use dc_02_reports::ReportLimits;
    use shared_types::{ItemId, ItemStatus};

    #[tokio::test]
    async fn test_list_give_award_award_again() {
        let node = Node::new();
        let alice = caller("alice");
        node.list(item("sofa", "alice", ItemStatus::Available)).await;

        // Not given yet.
        let err = node.points.award_for_item(&alice, "sofa").await.unwrap_err();
        assert!(matches!(err, PointsError::InvalidState { .. }));
        assert_eq!(node.store.award_count(), 0);

        // The listing subsystem marks it given.
        node.list(item("sofa", "alice", ItemStatus::Given)).await;

        let first = node.points.award_for_item(&alice, "sofa").await.unwrap();
        assert_eq!(first, AwardOutcome::Credited { points: 10 });

        let second = node.points.award_for_item(&alice, "sofa").await.unwrap();
        assert_eq!(second, AwardOutcome::AlreadyAwarded);

        let balance = node.points.balance(&alice).await.unwrap();
        assert_eq!(balance.points, 10);
        assert_eq!(balance.donations, 1);
        assert_eq!(node.store.award_count(), 1);

        let record = node
            .store
            .award_for(&ItemId::parse("sofa").unwrap())
            .unwrap();
        assert_eq!(record.giver_id, user("alice"));
    }

    #[tokio::test]
    async fn test_other_user_cannot_claim_given_item() {
        let node = Node::new();
        node.list(item("lamp", "alice", ItemStatus::Given)).await;

        let err = node
            .points
            .award_for_item(&caller("bob"), "lamp")
            .await
            .unwrap_err();
        assert_eq!(err, PointsError::Forbidden);

        // The owner can still claim afterwards.
        let outcome = node
            .points
            .award_for_item(&caller("alice"), "lamp")
            .await
            .unwrap();
        assert!(outcome.awarded());
    }

    #[tokio::test]
    async fn test_campaign_donations_earn_bonus() {
        let node = Node::new();
        node.list(item("coat", "alice", ItemStatus::Given).with_campaign("winter-drive"))
            .await;

        let outcome = node
            .points
            .award_for_item(&caller("alice"), "coat")
            .await
            .unwrap();
        assert_eq!(outcome, AwardOutcome::Credited { points: 15 });
    }

    #[tokio::test]
    async fn test_rank_climbs_with_donations() {
        let node = Node::with(LedgerPolicy::default(), ReportLimits::disabled());
        let alice = caller("alice");

        for n in 0..5 {
            let id = format!("item-{n}");
            node.list(item(&id, "alice", ItemStatus::Given)).await;
            node.points.award_for_item(&alice, &id).await.unwrap();
        }

        let balance = node.points.balance(&alice).await.unwrap();
        assert_eq!(balance.points, 50);
        assert_eq!(balance.donations, 5);
        assert_eq!(balance.rank, "Helper");
    }

    #[tokio::test]
    async fn test_reverting_status_does_not_allow_second_credit() {
        let node = Node::new();
        let alice = caller("alice");
        node.list(item("desk", "alice", ItemStatus::Given)).await;
        node.points.award_for_item(&alice, "desk").await.unwrap();

        node.list(item("desk", "alice", ItemStatus::Available)).await;
        let err = node.points.award_for_item(&alice, "desk").await.unwrap_err();
        assert!(matches!(err, PointsError::InvalidState { .. }));

        node.list(item("desk", "alice", ItemStatus::Given)).await;
        let again = node.points.award_for_item(&alice, "desk").await.unwrap();
        assert_eq!(again, AwardOutcome::AlreadyAwarded);
        assert_eq!(node.points.balance(&alice).await.unwrap().points, 10);
    }
}
