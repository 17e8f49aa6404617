// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Validation and normalization live in domains/jobs/actions and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseJobStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::jobs::models::{Job, JobChanges, JobFilter, NewJob};

// =============================================================================
// Job Store Trait (Infrastructure - keyed persistence for job records)
// =============================================================================

#[async_trait]
pub trait BaseJobStore: Send + Sync {
    /// Persist a new job; the store assigns the id
    async fn insert(&self, job: NewJob) -> Result<Job>;

    /// Look up a job. A missing id is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<Job>>;

    /// Full scan with filter and ordering, no pagination
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>>;

    /// Apply a partial replacement atomically. `Ok(None)` if the id is unknown.
    async fn update(&self, id: i64, changes: JobChanges) -> Result<Option<Job>>;

    /// Remove a job. Returns false if the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Cheap liveness check for the health endpoint
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}
