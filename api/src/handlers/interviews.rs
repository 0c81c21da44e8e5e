//! Interview handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{parse_provider, Member};
use crate::domain::entities::{
    Action, ApplicationId, Interview, InterviewDraft, InterviewId, InterviewUpdate, NewInterview,
    SessionUser,
};
use crate::error::AppError;
use crate::AppState;

/// Longest interview slot accepted, in minutes
pub const MAX_DURATION_MINUTES: i32 = 8 * 60;

#[derive(Debug, Deserialize)]
pub struct ListInterviewsQuery {
    pub application_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub success: bool,
    pub interview: Interview,
}

fn check_duration(minutes: i32) -> Result<(), AppError> {
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(AppError::BadRequest(format!(
            "durationMinutes must be between 1 and {}",
            MAX_DURATION_MINUTES
        )));
    }
    Ok(())
}

/// Check the request and bind it to the caller's organization
fn draft(member: &Member, req: NewInterview) -> Result<InterviewDraft, AppError> {
    let application_id = req
        .application_id
        .ok_or_else(|| AppError::missing_field("applicationId"))?;
    let scheduled_at = req
        .scheduled_at
        .ok_or_else(|| AppError::missing_field("scheduledAt"))?;
    check_duration(req.duration_minutes)?;
    let provider = req
        .provider
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| parse_provider(p).map(|p| p.to_string()))
        .transpose()?;

    Ok(InterviewDraft {
        organization_id: member.organization_id,
        application_id,
        interviewer_id: req.interviewer_id.or(Some(member.user_id())),
        scheduled_at,
        duration_minutes: req.duration_minutes,
        location: req.location,
        meeting_url: req.meeting_url,
        provider,
        notes: req.notes,
    })
}

/// GET /api/interviews
pub async fn list_interviews(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ListInterviewsQuery>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let application_id = query.application_id.map(ApplicationId);
    Ok(Json(
        state
            .interview_repo
            .list(&member.organization_id, application_id.as_ref())
            .await?,
    ))
}

/// POST /api/interviews
pub async fn create_interview(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<NewInterview>,
) -> Result<Json<InterviewResponse>, AppError> {
    let member = state.access.require(&user, Action::ScheduleInterviews).await?;
    let draft = draft(&member, req)?;

    if state
        .application_repo
        .find(&member.organization_id, &draft.application_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Application {} not found",
            draft.application_id
        )));
    }

    let interview = state.interview_repo.create(&draft).await?;
    tracing::info!(
        organization_id = %member.organization_id,
        interview_id = %interview.id,
        "Interview scheduled"
    );
    Ok(Json(InterviewResponse {
        success: true,
        interview,
    }))
}

/// PATCH /api/interviews/:id
pub async fn update_interview(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<InterviewUpdate>,
) -> Result<Json<InterviewResponse>, AppError> {
    let member = state.access.require(&user, Action::ScheduleInterviews).await?;
    if let Some(minutes) = update.duration_minutes {
        check_duration(minutes)?;
    }

    let interview = state
        .interview_repo
        .update(&member.organization_id, &InterviewId(id), &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {} not found", id)))?;
    Ok(Json(InterviewResponse {
        success: true,
        interview,
    }))
}
