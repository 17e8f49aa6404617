//! Client for the jobs API create endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::extract::ScrapedJob;

const USER_AGENT: &str = "ActuaryJobScraper/1.0";
const FROM_SCRAPER_HEADER: &str = "X-From-Scraper";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest slice of an error body kept in messages.
const MAX_ERROR_BODY: usize = 200;

/// Destination for scraped jobs.
#[async_trait]
pub trait JobSink: Send + Sync {
    /// Deliver one job. An error means this job was not accepted.
    async fn post_job(&self, job: &ScrapedJob) -> Result<()>;
}

/// Create payload sent to `POST /jobs`.
#[derive(Debug, Serialize)]
pub struct CreateJobPayload<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    /// ISO date, e.g. `2025-06-13`
    pub posting_date: String,
    pub job_type: &'a str,
    pub tags: &'a [String],
    pub job_url: Option<&'a str>,
    pub from_scraper: bool,
}

impl<'a> From<&'a ScrapedJob> for CreateJobPayload<'a> {
    fn from(job: &'a ScrapedJob) -> Self {
        Self {
            title: &job.title,
            company: &job.company,
            location: &job.location,
            posting_date: job.posting_date.format("%Y-%m-%d").to_string(),
            job_type: &job.job_type,
            tags: &job.tags,
            job_url: job.job_url.as_deref(),
            from_scraper: true,
        }
    }
}

/// Posts jobs to a running jobs API over HTTP.
pub struct JobsApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl JobsApiClient {
    /// Client for the create endpoint, e.g. `http://localhost:5000/jobs`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl JobSink for JobsApiClient {
    async fn post_job(&self, job: &ScrapedJob) -> Result<()> {
        let payload = CreateJobPayload::from(job);
        debug!(title = %job.title, company = %job.company, "Posting job");

        let resp = self
            .client
            .post(&self.endpoint)
            .header(FROM_SCRAPER_HEADER, "true")
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        debug!(status = status.as_u16(), "Job accepted");
        Ok(())
    }
}
