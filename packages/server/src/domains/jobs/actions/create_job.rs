//! Job creation action

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use super::normalize::{non_blank, normalize_tags, parse_posting_date, DEFAULT_JOB_TYPE};
use crate::domains::jobs::data::CreateJobInput;
use crate::domains::jobs::errors::{JobError, JobResult, MISSING_REQUIRED_FIELDS};
use crate::domains::jobs::models::{Job, NewJob};
use crate::kernel::ServerDeps;

/// Validate and normalize a create payload without touching the store.
///
/// `from_scraper_header` is set when the request carried the scraper marker header;
/// either that or the body flag marks the job as ingested.
pub fn prepare_new_job(input: CreateJobInput, from_scraper_header: bool) -> JobResult<NewJob> {
    let (Some(title), Some(company), Some(location)) = (
        non_blank(input.title),
        non_blank(input.company),
        non_blank(input.location),
    ) else {
        return Err(JobError::validation(MISSING_REQUIRED_FIELDS));
    };

    Ok(NewJob {
        title,
        company,
        location,
        posting_date: parse_posting_date(
            input.posting_date.as_ref().and_then(Value::as_str),
            Utc::now(),
        ),
        job_type: non_blank(input.job_type).unwrap_or_else(|| DEFAULT_JOB_TYPE.to_string()),
        tags: input.tags.map(normalize_tags).unwrap_or_default(),
        job_url: non_blank(input.job_url),
        from_scraper: input.from_scraper.unwrap_or(false) || from_scraper_header,
    })
}

/// Create a job and return it with its assigned id.
pub async fn create_job(
    input: CreateJobInput,
    from_scraper_header: bool,
    deps: &ServerDeps,
) -> JobResult<Job> {
    let new_job = prepare_new_job(input, from_scraper_header)?;
    let job = deps.job_store.insert(new_job).await?;

    info!(
        job_id = job.id,
        title = %job.title,
        company = %job.company,
        from_scraper = job.from_scraper,
        "Job created"
    );
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::jobs::data::TagsInput;

    fn valid_input() -> CreateJobInput {
        CreateJobInput {
            title: Some("Pricing Actuary".to_string()),
            company: Some("Acme Mutual".to_string()),
            location: Some("Hartford, CT".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn each_required_field_is_enforced() {
        let cases = [
            CreateJobInput { title: None, ..valid_input() },
            CreateJobInput { company: Some("  ".to_string()), ..valid_input() },
            CreateJobInput { location: Some(String::new()), ..valid_input() },
        ];

        for input in cases {
            let err = prepare_new_job(input, false).unwrap_err();
            assert!(matches!(err, JobError::Validation(ref m) if m == MISSING_REQUIRED_FIELDS));
        }
    }

    #[test]
    fn defaults_are_applied() {
        let new_job = prepare_new_job(valid_input(), false).unwrap();

        assert_eq!(new_job.job_type, DEFAULT_JOB_TYPE);
        assert!(new_job.tags.is_empty());
        assert!(new_job.job_url.is_none());
        assert!(!new_job.from_scraper);
    }

    #[test]
    fn scraper_header_marks_provenance() {
        let new_job = prepare_new_job(valid_input(), true).unwrap();
        assert!(new_job.from_scraper);

        let flagged = CreateJobInput {
            from_scraper: Some(true),
            ..valid_input()
        };
        assert!(prepare_new_job(flagged, false).unwrap().from_scraper);
    }

    #[test]
    fn tags_and_url_are_normalized() {
        let input = CreateJobInput {
            tags: Some(TagsInput::Text("SQL, Excel".to_string())),
            job_url: Some(" https://www.actuarylist.com/jobs/1 ".to_string()),
            ..valid_input()
        };
        let new_job = prepare_new_job(input, false).unwrap();

        assert_eq!(new_job.tags, vec!["SQL", "Excel"]);
        assert_eq!(
            new_job.job_url.as_deref(),
            Some("https://www.actuarylist.com/jobs/1")
        );
    }
}
