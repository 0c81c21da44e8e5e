//! Application pipeline handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::validation::required;
use crate::domain::entities::{
    Action, Application, ApplicationId, ApplicationStage, JobId, SessionUser,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub job_id: Option<Uuid>,
    pub stage: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStageRequest {
    pub stage: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub success: bool,
    pub application: Application,
}

fn parse_stage(raw: &str) -> Result<ApplicationStage, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<Application>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let stage = query
        .stage
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_stage)
        .transpose()?;
    let job_id = query.job_id.map(JobId);

    Ok(Json(
        state
            .application_repo
            .list(&member.organization_id, job_id.as_ref(), stage)
            .await?,
    ))
}

/// PATCH /api/applications/:id/stage
pub async fn update_stage(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStageRequest>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageApplications).await?;
    let stage = parse_stage(required(req.stage.as_deref(), "stage")?)?;

    let application = state
        .application_repo
        .update_stage(&member.organization_id, &ApplicationId(id), stage)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

    tracing::info!(
        organization_id = %member.organization_id,
        application_id = %id,
        stage = %stage,
        "Application stage changed"
    );
    Ok(Json(ApplicationResponse {
        success: true,
        application,
    }))
}
