//! Job handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::validation::required;
use crate::domain::entities::{
    job::validate_salary_range, Action, Job, JobId, JobStatus, JobUpdate, NewJob, SessionUser,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub success: bool,
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}

fn parse_status(raw: Option<&str>) -> Result<Option<JobStatus>, AppError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(AppError::BadRequest))
        .transpose()
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let status = parse_status(query.status.as_deref())?;
    Ok(Json(state.job_repo.list(&member.organization_id, status).await?))
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(mut req): Json<NewJob>,
) -> Result<Json<JobResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageJobs).await?;
    req.title = required(Some(&req.title), "title")?.to_string();
    validate_salary_range(req.salary_min, req.salary_max).map_err(AppError::BadRequest)?;

    let job = state
        .job_repo
        .create(&member.organization_id, &req, &member.user_id())
        .await?;

    tracing::info!(
        organization_id = %member.organization_id,
        job_id = %job.id,
        "Job created"
    );
    Ok(Json(JobResponse { success: true, job }))
}

/// GET /api/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let job = state
        .job_repo
        .find(&member.organization_id, &JobId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))?;
    Ok(Json(job))
}

/// PATCH /api/jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<JobResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageJobs).await?;
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::BadRequest("Title cannot be empty".to_string()));
    }

    let job_id = JobId(id);
    let existing = state
        .job_repo
        .find(&member.organization_id, &job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))?;
    validate_salary_range(
        update.salary_min.or(existing.salary_min),
        update.salary_max.or(existing.salary_max),
    )
    .map_err(AppError::BadRequest)?;

    let job = state
        .job_repo
        .update(&member.organization_id, &job_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))?;
    Ok(Json(JobResponse { success: true, job }))
}

/// DELETE /api/jobs/:id
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageJobs).await?;
    if !state.job_repo.delete(&member.organization_id, &JobId(id)).await? {
        return Err(AppError::NotFound(format!("Job {} not found", id)));
    }
    tracing::info!(organization_id = %member.organization_id, job_id = %id, "Job deleted");
    Ok(Json(DeletedResponse { success: true }))
}
