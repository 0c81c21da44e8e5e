//! Candidate handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::validation::{is_valid_email, required};
use crate::domain::entities::{
    Action, Application, Candidate, CandidateId, Document, NewCandidate, SessionUser,
};
use crate::error::{AppError, DomainError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListCandidatesQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub success: bool,
    pub candidate: Candidate,
}

/// A candidate with everything recorded against them
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub applications: Vec<Application>,
    pub documents: Vec<Document>,
}

/// GET /api/candidates
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ListCandidatesQuery>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    Ok(Json(
        state
            .candidate_repo
            .list(&member.organization_id, search)
            .await?,
    ))
}

/// POST /api/candidates
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(mut req): Json<NewCandidate>,
) -> Result<Json<CandidateResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageCandidates).await?;

    req.first_name = required(Some(&req.first_name), "firstName")?.to_string();
    req.last_name = required(Some(&req.last_name), "lastName")?.to_string();
    req.email = required(Some(&req.email), "email")?.to_lowercase();
    if !is_valid_email(&req.email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if state
        .candidate_repo
        .find_by_email(&member.organization_id, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Domain(DomainError::AlreadyExists(format!(
            "A candidate with email {} already exists",
            req.email
        ))));
    }

    let candidate = state
        .candidate_repo
        .create(&member.organization_id, &req)
        .await?;

    tracing::info!(
        organization_id = %member.organization_id,
        candidate_id = %candidate.id,
        "Candidate created"
    );
    Ok(Json(CandidateResponse {
        success: true,
        candidate,
    }))
}

/// GET /api/candidates/:id
pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateDetail>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let candidate_id = CandidateId(id);

    let candidate = state
        .candidate_repo
        .find(&member.organization_id, &candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", id)))?;
    let applications = state
        .application_repo
        .list_by_candidate(&member.organization_id, &candidate_id)
        .await?;
    let documents = state
        .document_repo
        .list_by_candidate(&member.organization_id, &candidate_id)
        .await?;

    Ok(Json(CandidateDetail {
        candidate,
        applications,
        documents,
    }))
}
