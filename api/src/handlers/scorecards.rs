//! Scorecard and scorecard template handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::validation::required;
use crate::domain::entities::{
    scorecard::{validate_ratings, RECOMMENDATIONS},
    Action, InterviewId, NewScorecard, NewScorecardTemplate, Scorecard, ScorecardDraft,
    ScorecardTemplate, SessionUser,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListScorecardsQuery {
    pub interview_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub success: bool,
    pub template: ScorecardTemplate,
}

#[derive(Debug, Serialize)]
pub struct ScorecardResponse {
    pub success: bool,
    pub scorecard: Scorecard,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}

fn check_recommendation(recommendation: Option<&str>) -> Result<(), AppError> {
    match recommendation {
        Some(r) if !RECOMMENDATIONS.contains(&r) => Err(AppError::BadRequest(format!(
            "recommendation must be one of: {}",
            RECOMMENDATIONS.join(", ")
        ))),
        _ => Ok(()),
    }
}

/// GET /api/scorecard-templates
pub async fn list_templates(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<Vec<ScorecardTemplate>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    Ok(Json(
        state
            .scorecard_repo
            .list_templates(&member.organization_id)
            .await?,
    ))
}

/// POST /api/scorecard-templates
pub async fn create_template(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(mut req): Json<NewScorecardTemplate>,
) -> Result<Json<TemplateResponse>, AppError> {
    let member = state
        .access
        .require(&user, Action::ManageScorecardTemplates)
        .await?;
    req.name = required(Some(&req.name), "name")?.to_string();
    if req.criteria.is_empty() {
        return Err(AppError::BadRequest(
            "A template needs at least one criterion".to_string(),
        ));
    }

    let template = state
        .scorecard_repo
        .create_template(&member.organization_id, &req)
        .await?;
    Ok(Json(TemplateResponse {
        success: true,
        template,
    }))
}

/// DELETE /api/scorecard-templates/:id
pub async fn delete_template(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let member = state
        .access
        .require(&user, Action::ManageScorecardTemplates)
        .await?;
    if !state
        .scorecard_repo
        .delete_template(&member.organization_id, &id)
        .await?
    {
        return Err(AppError::NotFound(format!("Template {} not found", id)));
    }
    Ok(Json(DeletedResponse { success: true }))
}

/// GET /api/scorecards?interview_id=
pub async fn list_scorecards(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ListScorecardsQuery>,
) -> Result<Json<Vec<Scorecard>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let interview_id = query
        .interview_id
        .map(InterviewId)
        .ok_or_else(|| AppError::missing_field("interview_id"))?;
    Ok(Json(
        state
            .scorecard_repo
            .list_scorecards(&member.organization_id, &interview_id)
            .await?,
    ))
}

/// POST /api/scorecards
pub async fn submit_scorecard(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<NewScorecard>,
) -> Result<Json<ScorecardResponse>, AppError> {
    let member = state.access.require(&user, Action::SubmitScorecards).await?;
    let interview_id = req
        .interview_id
        .ok_or_else(|| AppError::missing_field("interviewId"))?;
    validate_ratings(&req.ratings).map_err(AppError::BadRequest)?;
    check_recommendation(req.recommendation.as_deref())?;

    if state
        .interview_repo
        .find(&member.organization_id, &interview_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Interview {} not found",
            interview_id
        )));
    }
    if let Some(template_id) = req.template_id {
        if state
            .scorecard_repo
            .find_template(&member.organization_id, &template_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Template {} not found",
                template_id
            )));
        }
    }

    let scorecard = state
        .scorecard_repo
        .create_scorecard(&ScorecardDraft {
            organization_id: member.organization_id,
            interview_id,
            template_id: req.template_id,
            submitted_by: member.user_id(),
            ratings: serde_json::Value::Object(req.ratings),
            recommendation: req.recommendation,
            comments: req.comments,
        })
        .await?;

    tracing::info!(
        organization_id = %member.organization_id,
        interview_id = %interview_id,
        submitted_by = %member.user_id(),
        "Scorecard submitted"
    );
    Ok(Json(ScorecardResponse {
        success: true,
        scorecard,
    }))
}
