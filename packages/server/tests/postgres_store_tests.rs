//! Postgres-backed store tests.
//!
//! These start a Postgres container and are ignored by default. Run with:
//! cargo test -p job-board-server --test postgres_store_tests -- --ignored --test-threads=1

mod common;

use axum::http::StatusCode;
use common::*;
use job_board::domains::jobs::{JobChanges, JobFilter, JobSort};
use job_board::kernel::BaseJobStore;
use serde_json::json;
use test_context::test_context;

#[test_context(PostgresHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn tags_survive_a_database_round_trip(ctx: &PostgresHarness) {
    let created = ctx
        .api()
        .post(
            "/jobs",
            json!({
                "title": "Pricing Actuary",
                "company": "Acme Mutual",
                "location": "Remote",
                "tags": ["Pricing", "P&C", "Python"],
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let id = created.body["id"].as_i64().unwrap();
    let stored = ctx.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.tags, vec!["Pricing", "P&C", "Python"]);
    assert_eq!(stored.job_type, "Full-Time");
}

#[test_context(PostgresHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn list_orders_and_filters_in_sql(ctx: &PostgresHarness) {
    let store: &dyn BaseJobStore = &*ctx.store;
    let old = create_test_job(store, "Old", posted_on(0)).await.unwrap();
    let new = create_test_job(store, "New", posted_on(30)).await.unwrap();
    let tagged = create_tagged_job(store, "Tagged", "Contract", "Remote", &["Reserving", "SQL"])
        .await
        .unwrap();

    let newest_first = store.list(&JobFilter::default()).await.unwrap();
    let ids: Vec<i64> = newest_first.iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![tagged.id, new.id, old.id]);

    let oldest_first = store
        .list(&JobFilter::new(None, None, None, JobSort::PostingDateAsc))
        .await
        .unwrap();
    assert_eq!(oldest_first.first().map(|job| job.id), Some(old.id));

    let by_tag = store
        .list(&JobFilter::new(None, None, Some("SQL".to_string()), JobSort::default()))
        .await
        .unwrap();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].id, tagged.id);

    let by_type = ctx.api().get("/jobs?job_type=Contract").await;
    assert_eq!(by_type.ids(), vec![tagged.id]);
}

#[test_context(PostgresHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn update_and_delete_report_missing_rows(ctx: &PostgresHarness) {
    let store: &dyn BaseJobStore = &*ctx.store;
    let job = create_test_job(store, "Analyst", posted_on(5)).await.unwrap();

    let changes = JobChanges {
        title: Some("Senior Analyst".to_string()),
        tags: Some(vec!["Excel".to_string()]),
        ..Default::default()
    };
    let updated = store.update(job.id, changes).await.unwrap().unwrap();
    assert_eq!(updated.title, "Senior Analyst");
    assert_eq!(updated.company, job.company);
    assert_eq!(updated.tags, vec!["Excel"]);

    assert!(store.delete(job.id).await.unwrap());
    assert!(!store.delete(job.id).await.unwrap());
    assert!(store
        .update(job.id, JobChanges::default())
        .await
        .unwrap()
        .is_none());

    let health = ctx.api().get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["store"]["backend"], "postgres");
}
