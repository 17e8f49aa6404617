use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Job posting - the only entity the board stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posting_date: DateTime<Utc>,
    pub job_type: String, // 'Full-Time', 'Part-Time', 'Internship', 'Contract', ...
    pub tags: Vec<String>,
    pub job_url: Option<String>,
    pub from_scraper: bool,
}

impl Job {
    /// Tags in their comma-joined form (what the `tag` filter matches against)
    pub fn joined_tags(&self) -> String {
        self.tags.join(",")
    }
}

/// Validated, normalized fields for a job that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posting_date: DateTime<Utc>,
    pub job_type: String,
    pub tags: Vec<String>,
    pub job_url: Option<String>,
    pub from_scraper: bool,
}

/// Partial replacement of a stored job. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobChanges {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl JobChanges {
    pub fn apply_to(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(company) = self.company {
            job.company = company;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(job_type) = self.job_type {
            job.job_type = job_type;
        }
        if let Some(tags) = self.tags {
            job.tags = tags;
        }
    }
}

// =============================================================================
// Listing filters
// =============================================================================

/// Ordering of list results by posting date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobSort {
    PostingDateAsc,
    #[default]
    PostingDateDesc,
}

impl JobSort {
    /// Parse the `sort` query parameter. Unknown values fall back to newest-first.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("posting_date_asc") => JobSort::PostingDateAsc,
            _ => JobSort::PostingDateDesc,
        }
    }

    fn sql_direction(self) -> &'static str {
        match self {
            JobSort::PostingDateAsc => "ASC",
            JobSort::PostingDateDesc => "DESC",
        }
    }
}

impl std::fmt::Display for JobSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobSort::PostingDateAsc => write!(f, "posting_date_asc"),
            JobSort::PostingDateDesc => write!(f, "posting_date_desc"),
        }
    }
}

/// Filters for listing jobs. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// Exact match
    pub job_type: Option<String>,
    /// Exact match
    pub location: Option<String>,
    /// Substring of the comma-joined tag string, not a whole-tag match
    pub tag: Option<String>,
    pub sort: JobSort,
}

impl JobFilter {
    pub fn new(
        job_type: Option<String>,
        location: Option<String>,
        tag: Option<String>,
        sort: JobSort,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            job_type: non_empty(job_type),
            location: non_empty(location),
            tag: non_empty(tag),
            sort,
        }
    }

    /// In-process equivalent of the WHERE clause in [`Job::list`]
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(job_type) = &self.job_type {
            if &job.job_type != job_type {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if &job.location != location {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !job.joined_tags().contains(tag.as_str()) {
                return false;
            }
        }
        true
    }

    /// In-process equivalent of the ORDER BY clause in [`Job::list`]
    pub fn sort_jobs(&self, jobs: &mut [Job]) {
        jobs.sort_by(|a, b| {
            let ordering = a
                .posting_date
                .cmp(&b.posting_date)
                .then_with(|| a.id.cmp(&b.id));
            match self.sort {
                JobSort::PostingDateAsc => ordering,
                JobSort::PostingDateDesc => ordering.reverse(),
            }
        });
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Job {
    /// Find job by ID
    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(job)
    }

    /// Find all jobs matching the filter, ordered by posting date
    pub async fn list(filter: &JobFilter, pool: &PgPool) -> Result<Vec<Self>> {
        let direction = filter.sort.sql_direction();
        let sql = format!(
            r#"
            SELECT * FROM jobs
            WHERE ($1::text IS NULL OR job_type = $1)
              AND ($2::text IS NULL OR location = $2)
              AND ($3::text IS NULL OR strpos(array_to_string(tags, ','), $3) > 0)
            ORDER BY posting_date {direction}, id {direction}
            "#
        );

        let jobs = sqlx::query_as::<_, Job>(&sql)
            .bind(&filter.job_type)
            .bind(&filter.location)
            .bind(&filter.tag)
            .fetch_all(pool)
            .await?;
        Ok(jobs)
    }

    /// Insert a new job and return it with its assigned id
    pub async fn create(new_job: &NewJob, pool: &PgPool) -> Result<Self> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                title, company, location, posting_date, job_type, tags, job_url, from_scraper
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new_job.title)
        .bind(&new_job.company)
        .bind(&new_job.location)
        .bind(new_job.posting_date)
        .bind(&new_job.job_type)
        .bind(&new_job.tags)
        .bind(&new_job.job_url)
        .bind(new_job.from_scraper)
        .fetch_one(pool)
        .await?;
        Ok(job)
    }

    /// Replace the provided fields in a single statement. Returns None if the id is unknown.
    pub async fn update(id: i64, changes: &JobChanges, pool: &PgPool) -> Result<Option<Self>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                location = COALESCE($4, location),
                job_type = COALESCE($5, job_type),
                tags = COALESCE($6::text[], tags)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.company)
        .bind(&changes.location)
        .bind(&changes.job_type)
        .bind(&changes.tags)
        .fetch_optional(pool)
        .await?;
        Ok(job)
    }

    /// Delete job by ID. Returns false if nothing was deleted.
    pub async fn delete(id: i64, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
