//! PostgreSQL-backed job store.
//!
//! Thin adapter from [`BaseJobStore`] to the queries on the `Job` model.
//! Each operation is a single statement, so writes are atomic without
//! explicit transactions.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::jobs::models::{Job, JobChanges, JobFilter, NewJob};
use crate::kernel::BaseJobStore;

pub struct PostgresJobStore {
    pool: PgPool,
}

impl PostgresJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseJobStore for PostgresJobStore {
    async fn insert(&self, job: NewJob) -> Result<Job> {
        Job::create(&job, &self.pool).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Job>> {
        Job::find_by_id(id, &self.pool).await
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        Job::list(filter, &self.pool).await
    }

    async fn update(&self, id: i64, changes: JobChanges) -> Result<Option<Job>> {
        Job::update(id, &changes, &self.pool).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Job::delete(id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
