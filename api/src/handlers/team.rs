//! Team handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::InviteRequest;
use crate::domain::entities::{Action, Invitation, Profile, Role, SessionUser, UserId};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub success: bool,
    pub invitation: Invitation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleResponse {
    pub success: bool,
    pub user_id: UserId,
    pub role: Role,
}

/// GET /api/team
pub async fn list_team(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    Ok(Json(state.team.list(&member).await?))
}

/// POST /api/team/invite
pub async fn invite(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<InviteRequest>,
) -> Result<Json<InviteResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageTeam).await?;
    let invitation = state.team.invite(&member, &req).await?;
    Ok(Json(InviteResponse {
        success: true,
        invitation,
    }))
}

/// PATCH /api/team/:user_id/role
pub async fn change_role(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(target): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ChangeRoleResponse>, AppError> {
    let member = state.access.require(&user, Action::ManageTeam).await?;
    let target = UserId(target);
    let role = state
        .team
        .change_role(&member, &target, req.role.as_deref())
        .await?;
    Ok(Json(ChangeRoleResponse {
        success: true,
        user_id: target,
        role,
    }))
}
