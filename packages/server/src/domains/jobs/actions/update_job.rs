//! Partial job update action

use tracing::info;

use super::normalize::clean_tags;
use crate::domains::jobs::data::{TagsInput, UpdateJobInput};
use crate::domains::jobs::errors::{JobError, JobResult};
use crate::domains::jobs::models::{Job, JobChanges};
use crate::kernel::ServerDeps;

pub const TAGS_MUST_BE_LIST: &str = "tags must be a list of strings";

/// Replacement value for a required text field; blank values are rejected.
fn required_change(field: &str, value: Option<String>) -> JobResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => {
            Err(JobError::validation(format!("{field} must not be empty")))
        }
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}

/// Validate an update payload into the set of column changes.
///
/// Unlike create, update only accepts tags in list form.
pub fn prepare_changes(input: UpdateJobInput) -> JobResult<JobChanges> {
    let tags = match input.tags {
        None => None,
        Some(TagsInput::List(tags)) => Some(clean_tags(tags)),
        Some(TagsInput::Text(_)) => return Err(JobError::validation(TAGS_MUST_BE_LIST)),
    };

    Ok(JobChanges {
        title: required_change("title", input.title)?,
        company: required_change("company", input.company)?,
        location: required_change("location", input.location)?,
        job_type: required_change("job_type", input.job_type)?,
        tags,
    })
}

/// Replace the supplied fields of an existing job.
pub async fn update_job(id: i64, input: UpdateJobInput, deps: &ServerDeps) -> JobResult<Job> {
    // Unknown ids are NotFound even when the payload is also invalid
    if deps.job_store.find_by_id(id).await?.is_none() {
        return Err(JobError::NotFound);
    }

    let changes = prepare_changes(input)?;
    let job = deps
        .job_store
        .update(id, changes)
        .await?
        .ok_or(JobError::NotFound)?;

    info!(job_id = job.id, "Job updated");
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_tags_are_rejected_on_update() {
        let input = UpdateJobInput {
            tags: Some(TagsInput::Text("x,y".to_string())),
            ..Default::default()
        };
        let err = prepare_changes(input).unwrap_err();
        assert!(matches!(err, JobError::Validation(ref m) if m == TAGS_MUST_BE_LIST));
    }

    #[test]
    fn list_tags_are_accepted() {
        let input = UpdateJobInput {
            tags: Some(TagsInput::List(vec!["x".to_string(), "y".to_string()])),
            ..Default::default()
        };
        let changes = prepare_changes(input).unwrap();
        assert_eq!(changes.tags, Some(vec!["x".to_string(), "y".to_string()]));
        assert_eq!(changes.title, None);
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let input = UpdateJobInput {
            location: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            prepare_changes(input),
            Err(JobError::Validation(_))
        ));
    }
}
