//! Request payloads accepted by the jobs API.

use serde::Deserialize;
use serde_json::Value;

/// Tags as callers may send them: a JSON list, or one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

/// Body of `POST /jobs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateJobInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// ISO-8601 date or date-time. Any other JSON value is accepted and
    /// treated as unparseable.
    pub posting_date: Option<Value>,
    pub job_type: Option<String>,
    pub tags: Option<TagsInput>,
    pub job_url: Option<String>,
    pub from_scraper: Option<bool>,
}

/// Body of `PUT/PATCH /jobs/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJobInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    /// Must be the list form; the comma-string form is rejected on update.
    pub tags: Option<TagsInput>,
}

/// Query string of `GET /jobs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsQuery {
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
}
