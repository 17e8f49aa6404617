//! Read and delete actions

use tracing::{debug, info};

use crate::domains::jobs::data::ListJobsQuery;
use crate::domains::jobs::errors::{JobError, JobResult};
use crate::domains::jobs::models::{Job, JobFilter, JobSort};
use crate::kernel::ServerDeps;

/// List every job matching the query, ordered by posting date.
pub async fn list_jobs(query: ListJobsQuery, deps: &ServerDeps) -> JobResult<Vec<Job>> {
    let filter = JobFilter::new(
        query.job_type,
        query.location,
        query.tag,
        JobSort::from_param(query.sort.as_deref()),
    );
    let jobs = deps.job_store.list(&filter).await?;

    debug!(count = jobs.len(), sort = %filter.sort, "Listed jobs");
    Ok(jobs)
}

pub async fn get_job(id: i64, deps: &ServerDeps) -> JobResult<Job> {
    deps.job_store
        .find_by_id(id)
        .await?
        .ok_or(JobError::NotFound)
}

pub async fn delete_job(id: i64, deps: &ServerDeps) -> JobResult<()> {
    if !deps.job_store.delete(id).await? {
        return Err(JobError::NotFound);
    }
    info!(job_id = id, "Job deleted");
    Ok(())
}
