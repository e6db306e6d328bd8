//! # Donation Commons Engine Benchmarks
//!
//! | Group | Path |
//! |-------|------|
//! | dc-01-toggle | like toggle against the in-memory store |
//! | dc-02-validation | generic and item report validation |
//! | dc-03-award | gate plus award procedure, first and repeated |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dc_01_interactions::{InteractionApi, InteractionKind, InteractionService};
use dc_02_reports::{validate_generic, validate_item, ItemReportSubmission, ReportSubmission};
use dc_03_points::{PointsApi, PointsService};
use dc_04_store::{InMemoryStore, ItemRegistry, LedgerPolicy};
use shared_types::{Caller, Item, ItemId, ItemStatus, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("benchmark runtime")
}

fn caller(raw: &str) -> Caller {
    Caller::Authenticated(UserId::parse(raw).expect("valid user id"))
}

// ============================================================================
// DC-01: Interaction toggles
// ============================================================================

fn bench_toggle(c: &mut Criterion) {
    let rt = runtime();
    let store = Arc::new(InMemoryStore::new(LedgerPolicy::default()));
    let service = InteractionService::new(Arc::clone(&store));
    let alice = caller("alice");

    let mut group = c.benchmark_group("dc-01-toggle");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("like_toggle", |b| {
        b.iter(|| {
            rt.block_on(service.toggle(&alice, InteractionKind::Like, black_box("item-1")))
                .expect("toggle")
        })
    });

    for actors in [10usize, 100, 1000] {
        let callers: Vec<Caller> = (0..actors).map(|i| caller(&format!("user-{i}"))).collect();
        group.throughput(Throughput::Elements(actors as u64));
        group.bench_with_input(BenchmarkId::new("fan_in_likes", actors), &callers, |b, callers| {
            b.iter(|| {
                rt.block_on(async {
                    for who in callers {
                        service
                            .toggle(who, InteractionKind::Like, "popular")
                            .await
                            .expect("toggle");
                    }
                })
            })
        });
    }

    group.finish();
}

// ============================================================================
// DC-02: Report validation
// ============================================================================

fn bench_report_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dc-02-validation");

    let generic = ReportSubmission {
        reported_item_id: Some("item-9".into()),
        reason: Some("Other".into()),
        details: Some("x".repeat(900)),
        ..Default::default()
    };
    group.bench_function("generic_other_with_details", |b| {
        b.iter(|| validate_generic(black_box(&generic)))
    });

    let item = ItemReportSubmission {
        item_id: Some("item-9".into()),
        reason: Some("Not as described".into()),
        details: None,
    };
    group.bench_function("item_free_text", |b| {
        b.iter(|| validate_item(black_box(&item)))
    });

    group.finish();
}

// ============================================================================
// DC-03: Points awards
// ============================================================================

fn bench_award(c: &mut Criterion) {
    let rt = runtime();
    let store = Arc::new(InMemoryStore::new(LedgerPolicy::default()));
    let points = PointsService::new(Arc::clone(&store), Arc::clone(&store));
    let alice = caller("alice");
    let owner = UserId::parse("alice").expect("valid user id");

    rt.block_on(async {
        for i in 0..10_000 {
            let id = ItemId::parse(&format!("gift-{i}")).expect("valid item id");
            store
                .upsert_item(Item::new(id, owner.clone(), ItemStatus::Given))
                .await
                .expect("seed");
        }
    });

    let mut group = c.benchmark_group("dc-03-award");

    let mut next = 0usize;
    group.bench_function("first_award", |b| {
        b.iter(|| {
            let id = format!("gift-{}", next % 10_000);
            next += 1;
            rt.block_on(points.award_for_item(&alice, &id)).expect("award")
        })
    });

    group.bench_function("repeated_award", |b| {
        b.iter(|| rt.block_on(points.award_for_item(&alice, black_box("gift-0"))).expect("award"))
    });

    group.finish();
}

criterion_group!(benches, bench_toggle, bench_report_validation, bench_award);
criterion_main!(benches);
