//! In-memory job store for tests and for running without a database.
//!
//! Data is lost on restart. Ids are never reused, even after deletes.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::domains::jobs::models::{Job, JobChanges, JobFilter, NewJob};
use crate::kernel::BaseJobStore;

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    jobs: BTreeMap<i64, Job>,
}

#[derive(Default)]
pub struct MemoryJobStore {
    state: RwLock<MemoryState>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored jobs
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.jobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("memory job store lock poisoned")
}

#[async_trait]
impl BaseJobStore for MemoryJobStore {
    async fn insert(&self, job: NewJob) -> Result<Job> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.last_id += 1;
        let stored = Job {
            id: state.last_id,
            title: job.title,
            company: job.company,
            location: job.location,
            posting_date: job.posting_date,
            job_type: job.job_type,
            tags: job.tags,
            job_url: job.job_url,
            from_scraper: job.from_scraper,
        };
        state.jobs.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Job>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.jobs.get(&id).cloned())
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut jobs: Vec<Job> = state
            .jobs
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        filter.sort_jobs(&mut jobs);
        Ok(jobs)
    }

    async fn update(&self, id: i64, changes: JobChanges) -> Result<Option<Job>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(job) = state.jobs.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(job);
        Ok(Some(job.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.jobs.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        let _state = self.state.read().map_err(poisoned)?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
