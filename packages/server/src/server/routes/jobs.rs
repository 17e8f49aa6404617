//! REST handlers for `/jobs`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::domains::jobs::actions;
use crate::domains::jobs::data::{CreateJobInput, ListJobsQuery, UpdateJobInput};
use crate::domains::jobs::{Job, JobError};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::ScraperOrigin;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Non-integer ids can never match a job, so they are reported like unknown ids.
fn job_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::Job(JobError::NotFound))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(input)| input)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /jobs
pub async fn list_jobs(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let jobs = actions::list_jobs(query, &state.deps).await?;
    Ok(Json(jobs))
}

/// GET /jobs/:id
pub async fn get_job(
    Extension(state): Extension<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Job>, ApiError> {
    let id = job_id(path)?;
    let job = actions::get_job(id, &state.deps).await?;
    Ok(Json(job))
}

/// POST /jobs
pub async fn create_job(
    Extension(state): Extension<AppState>,
    Extension(origin): Extension<ScraperOrigin>,
    body: Result<Json<CreateJobInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let input = json_body(body)?;
    let job = actions::create_job(input, origin.0, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /jobs/:id and PATCH /jobs/:id
pub async fn update_job(
    Extension(state): Extension<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateJobInput>, JsonRejection>,
) -> Result<Json<Job>, ApiError> {
    let id = job_id(path)?;
    let input = json_body(body)?;
    let job = actions::update_job(id, input, &state.deps).await?;
    Ok(Json(job))
}

/// DELETE /jobs/:id
pub async fn delete_job(
    Extension(state): Extension<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = job_id(path)?;
    actions::delete_job(id, &state.deps).await?;
    Ok(Json(MessageResponse {
        message: "Job deleted".to_string(),
    }))
}
