//! # Persistence
//!
//! Uniqueness and award idempotency survive a RocksDB restart.

#[cfg(all(test, feature = "rocksdb"))]
mod tests {
    use crate::fixtures::{caller, item};
    use dc_01_interactions::{InteractionApi, InteractionKind, InteractionService, ToggleAction};
    use dc_02_reports::{ItemReportSubmission, ReportApi, ReportError, ReportLimits, ReportService};
    use dc_03_points::{AwardOutcome, PointsApi, PointsService};
    use dc_04_store::{ItemRegistry, LedgerPolicy, RocksDbConfig, RocksDbStore};
    use shared_types::ItemStatus;
    use std::sync::Arc;

    fn open(path: &std::path::Path) -> Arc<RocksDbStore> {
        let store = RocksDbStore::open(RocksDbConfig::for_testing(path), LedgerPolicy::default())
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let alice = caller("alice");

        {
            let store = open(dir.path());
            store
                .upsert_item(item("piano", "alice", ItemStatus::Given))
                .await
                .unwrap();

            let points = PointsService::new(Arc::clone(&store), Arc::clone(&store));
            assert!(points.award_for_item(&alice, "piano").await.unwrap().awarded());

            let reports = ReportService::new(Arc::clone(&store), &ReportLimits::disabled());
            reports
                .submit_item_report(
                    &alice,
                    ItemReportSubmission {
                        item_id: Some("piano".into()),
                        reason: Some("Out of tune".into()),
                        details: None,
                    },
                )
                .await
                .unwrap();

            let interactions = InteractionService::new(Arc::clone(&store));
            let action = interactions
                .toggle(&alice, InteractionKind::Like, "piano")
                .await
                .unwrap();
            assert_eq!(action, ToggleAction::Added);
        }

        let store = open(dir.path());

        let points = PointsService::new(Arc::clone(&store), Arc::clone(&store));
        assert_eq!(
            points.award_for_item(&alice, "piano").await.unwrap(),
            AwardOutcome::AlreadyAwarded
        );
        assert_eq!(points.balance(&alice).await.unwrap().points, 10);

        let reports = ReportService::new(Arc::clone(&store), &ReportLimits::disabled());
        let err = reports
            .submit_item_report(
                &alice,
                ItemReportSubmission {
                    item_id: Some("piano".into()),
                    reason: Some("Still out of tune".into()),
                    details: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, ReportError::DuplicateReport);

        let interactions = InteractionService::new(Arc::clone(&store));
        let action = interactions
            .toggle(&alice, InteractionKind::Like, "piano")
            .await
            .unwrap();
        assert_eq!(action, ToggleAction::Removed);
    }
}
