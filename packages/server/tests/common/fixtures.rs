//! Test fixtures for creating test data.
//!
//! These fixtures write through the store trait directly, bypassing the API.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use job_board::domains::jobs::{Job, NewJob};
use job_board::kernel::BaseJobStore;

/// A posting date `days` after 2025-01-01 UTC
pub fn posted_on(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(days)
}

/// A valid job with the given title and posting date
pub fn new_job(title: &str, posting_date: DateTime<Utc>) -> NewJob {
    NewJob {
        title: title.to_string(),
        company: "Acme Mutual".to_string(),
        location: "Hartford, CT".to_string(),
        posting_date,
        job_type: "Full-Time".to_string(),
        tags: vec![],
        job_url: None,
        from_scraper: false,
    }
}

/// Create a full-time job posted on the given date
pub async fn create_test_job(
    store: &dyn BaseJobStore,
    title: &str,
    posting_date: DateTime<Utc>,
) -> Result<Job> {
    store.insert(new_job(title, posting_date)).await
}

/// Create a job with explicit type, location and tags
pub async fn create_tagged_job(
    store: &dyn BaseJobStore,
    title: &str,
    job_type: &str,
    location: &str,
    tags: &[&str],
) -> Result<Job> {
    store
        .insert(NewJob {
            job_type: job_type.to_string(),
            location: location.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..new_job(title, Utc::now())
        })
        .await
}
