//! # Races
//!
//! Many tasks hit the same key at once on a multi-threaded runtime. The
//! engines do check-then-act without locks; these tests pin down that the
//! store's constraints still hold and that the losing side of each race gets
//! the documented outcome rather than an error.

#[cfg(test)]
mod tests {
    use crate::fixtures::{caller, item, Node};
    use dc_01_interactions::{InteractionApi, InteractionError, InteractionKind};
    use dc_02_reports::{ItemReportSubmission, ReportApi, ReportError, ReportSubmission};
    use dc_03_points::{AwardOutcome, PointsApi};
    use futures::future::join_all;
    use shared_types::ItemStatus;

    const RACERS: usize = 32;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_never_duplicate_an_edge() {
        let node = Node::new();
        let api = node.interaction_api();

        let tasks = (0..RACERS).map(|_| {
            let api = api.clone();
            tokio::spawn(async move {
                api.toggle(&caller("alice"), InteractionKind::Like, "item-1")
                    .await
            })
        });
        for result in join_all(tasks).await {
            assert!(result.unwrap().is_ok(), "a conflicting insert is not an error");
        }

        assert!(node.store.edge_count() <= 1);
        let count = api.count(InteractionKind::Like, "item-1").await.unwrap();
        assert!(count <= 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_distinct_actors_all_count() {
        let node = Node::new();
        let api = node.interaction_api();

        let tasks = (0..RACERS).map(|n| {
            let api = api.clone();
            tokio::spawn(async move {
                api.toggle(&caller(&format!("user-{n}")), InteractionKind::Save, "item-1")
                    .await
            })
        });
        for result in join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let count = api.count(InteractionKind::Save, "item-1").await.unwrap();
        assert_eq!(count, RACERS as u64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_follows_create_one_edge() {
        let node = Node::new();
        let api = node.interaction_api();

        let tasks = (0..RACERS).map(|_| {
            let api = api.clone();
            tokio::spawn(async move { api.follow(&caller("alice"), "bob").await })
        });
        let results: Vec<_> = join_all(tasks).await.into_iter().map(|r| r.unwrap()).collect();

        let created = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(created, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == InteractionError::AlreadyFollowing));
        assert_eq!(node.store.edge_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_generic_reports_are_all_silent_successes() {
        let node = Node::new();
        let api = node.report_api();

        let tasks = (0..RACERS).map(|_| {
            let api = api.clone();
            tokio::spawn(async move {
                let submission = ReportSubmission {
                    reported_item_id: Some("item-1".into()),
                    reason: Some("Scam or fraud attempt".into()),
                    ..Default::default()
                };
                api.submit_report(&caller("alice"), submission).await
            })
        });
        for result in join_all(tasks).await {
            assert!(result.unwrap().is_ok());
        }
        assert_eq!(node.store.report_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_item_reports_accept_exactly_one() {
        let node = Node::new();
        let api = node.report_api();

        let tasks = (0..RACERS).map(|_| {
            let api = api.clone();
            tokio::spawn(async move {
                let submission = ItemReportSubmission {
                    item_id: Some("item-1".into()),
                    reason: Some("Counterfeit".into()),
                    details: None,
                };
                api.submit_item_report(&caller("alice"), submission).await
            })
        });
        let results: Vec<_> = join_all(tasks).await.into_iter().map(|r| r.unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == ReportError::DuplicateReport));
        assert_eq!(node.store.report_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_awards_credit_once() {
        let node = Node::new();
        node.list(item("bike", "alice", ItemStatus::Given)).await;
        let api = node.points_api();

        let tasks = (0..RACERS).map(|_| {
            let api = api.clone();
            tokio::spawn(async move { api.award_for_item(&caller("alice"), "bike").await })
        });
        let outcomes: Vec<_> = join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .collect();

        let credited = outcomes.iter().filter(|o| o.awarded()).count();
        assert_eq!(credited, 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| **o == AwardOutcome::AlreadyAwarded)
                .count(),
            RACERS - 1
        );

        let balance = api.balance(&caller("alice")).await.unwrap();
        assert_eq!(balance.points, 10);
        assert_eq!(balance.donations, 1);
    }
}
