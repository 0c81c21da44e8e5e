//! Team membership: listing, invitations and role changes

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::RngCore;
use serde::Deserialize;

use super::access_service::Member;
use super::emails;
use super::validation::{is_valid_email, required};
use crate::domain::entities::{Invitation, NewInvitation, Profile, Role, UserId};
use crate::domain::ports::{
    EmailSender, InvitationRepository, OrganizationRepository, ProfileRepository,
};
use crate::error::{AppError, DomainError};

pub const INVITATION_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InviteRequest {
    pub email: Option<String>,
    pub role: Option<String>,
}

/// 32 random bytes, hex encoded
pub fn generate_invitation_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Roles the caller may hand out: never the platform role, and never one
/// permitted anything the caller's own role is not
fn parse_grantable_role(member: &Member, raw: &str) -> Result<Role, AppError> {
    let role: Role = raw.parse().map_err(AppError::BadRequest)?;
    if role.is_platform_admin() {
        return Err(AppError::BadRequest(format!("Role {} cannot be granted", role)));
    }
    if !member.role.covers(role) {
        return Err(AppError::Forbidden(format!(
            "Your role cannot grant {}",
            role
        )));
    }
    Ok(role)
}

pub struct TeamService {
    profiles: Arc<dyn ProfileRepository>,
    organizations: Arc<dyn OrganizationRepository>,
    invitations: Arc<dyn InvitationRepository>,
    email: Arc<dyn EmailSender>,
    app_base_url: String,
}

impl TeamService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        organizations: Arc<dyn OrganizationRepository>,
        invitations: Arc<dyn InvitationRepository>,
        email: Arc<dyn EmailSender>,
        app_base_url: String,
    ) -> Self {
        Self {
            profiles,
            organizations,
            invitations,
            email,
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list(&self, member: &Member) -> Result<Vec<Profile>, AppError> {
        Ok(self
            .profiles
            .list_by_organization(&member.organization_id)
            .await?)
    }

    /// E-mail the accept link, then record the invitation.
    ///
    /// Delivery failure is returned to the caller and records nothing, so the
    /// invite can be retried.
    pub async fn invite(
        &self,
        member: &Member,
        request: &InviteRequest,
    ) -> Result<Invitation, AppError> {
        let email = required(request.email.as_deref(), "email")?.to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }
        let role = parse_grantable_role(member, required(request.role.as_deref(), "role")?)?;

        if self
            .invitations
            .find_pending(&member.organization_id, &email)
            .await?
            .is_some()
        {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "An invitation for {} is already pending",
                email
            ))));
        }

        let organization = self
            .organizations
            .find_by_id(&member.organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

        let token = generate_invitation_token();
        let accept_url = format!(
            "{}/invite?token={}",
            self.app_base_url,
            urlencoding::encode(&token)
        );
        self.email
            .send(&emails::team_invitation(
                &email,
                &organization.name,
                &role.to_string(),
                &accept_url,
            ))
            .await?;

        let invitation = self
            .invitations
            .create(&NewInvitation {
                organization_id: member.organization_id,
                email: email.clone(),
                role,
                token,
                invited_by: member.user_id(),
                expires_at: Utc::now() + Duration::days(INVITATION_TTL_DAYS),
            })
            .await?;

        tracing::info!(
            organization_id = %member.organization_id,
            invited_by = %member.user_id(),
            role = %role,
            "Team invitation sent"
        );
        Ok(invitation)
    }

    pub async fn change_role(
        &self,
        member: &Member,
        target: &UserId,
        raw_role: Option<&str>,
    ) -> Result<Role, AppError> {
        if *target == member.user_id() {
            return Err(AppError::BadRequest(
                "You cannot change your own role".to_string(),
            ));
        }
        let role = parse_grantable_role(member, required(raw_role, "role")?)?;

        let current = self
            .profiles
            .find_by_user_id(target)
            .await?
            .filter(|p| p.organization_id == Some(member.organization_id))
            .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;
        if let Ok(current_role) = current.role.parse::<Role>() {
            if !member.role.covers(current_role) {
                return Err(AppError::Forbidden(format!(
                    "Your role cannot change a member with role {}",
                    current_role
                )));
            }
        }

        if !self
            .profiles
            .update_role(&member.organization_id, target, role)
            .await?
        {
            return Err(AppError::NotFound("Team member not found".to_string()));
        }

        tracing::info!(
            organization_id = %member.organization_id,
            user_id = %target,
            role = %role,
            changed_by = %member.user_id(),
            "Team member role changed"
        );
        Ok(role)
    }
}
