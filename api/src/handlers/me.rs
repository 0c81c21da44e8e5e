//! Current user handler

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::domain::entities::{Organization, Profile, SessionUser};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: SessionUser,
    pub profile: Option<Profile>,
    pub organization: Option<Organization>,
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<MeResponse>, AppError> {
    let profile = state.access.profile(&user).await?;
    let organization = match profile.as_ref().and_then(|p| p.organization_id) {
        Some(org_id) => state.organization_repo.find_by_id(&org_id).await?,
        None => None,
    };

    Ok(Json(MeResponse {
        user,
        profile,
        organization,
    }))
}
