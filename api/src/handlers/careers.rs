//! Public career page handlers and career page settings

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::PUBLIC_CACHE_CONTROL;
use crate::app::ApplyRequest;
use crate::domain::entities::{
    Action, Application, CareerPageUpdate, JobId, Organization, SessionUser,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub success: bool,
    pub application: Application,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub organization: Organization,
}

/// GET /api/careers/:slug
pub async fn get_career_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let page = state.careers.page(&slug).await?;
    Ok(([(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)], Json(page)))
}

/// GET /api/careers/:slug/jobs/:job_id
pub async fn get_career_job(
    State(state): State<AppState>,
    Path((slug, job_id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let job = state.careers.job(&slug, &JobId(job_id)).await?;
    Ok(([(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)], Json(job)))
}

/// POST /api/careers/:slug/jobs/:job_id/apply
pub async fn apply(
    State(state): State<AppState>,
    Path((slug, job_id)): Path<(String, Uuid)>,
    Json(req): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>, AppError> {
    let application = state.careers.apply(&slug, &JobId(job_id), req).await?;
    Ok(Json(ApplyResponse {
        success: true,
        application,
    }))
}

/// PUT /api/careers/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(update): Json<CareerPageUpdate>,
) -> Result<Json<SettingsResponse>, AppError> {
    let member = state.access.require(&user, Action::EditCareerPage).await?;
    let organization = state
        .careers
        .update_settings(&member.organization_id, &update)
        .await?;
    Ok(Json(SettingsResponse {
        success: true,
        organization,
    }))
}
