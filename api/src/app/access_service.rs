//! Access-control resolver
//!
//! Answers "may this user perform this action in this organization" from the
//! user's profile row and the permission table on [`Action`]. Every check
//! re-reads the profile.

use std::sync::Arc;

use crate::domain::entities::{
    AccessDecision, Action, OrganizationId, Profile, Role, SessionUser, UserId,
};
use crate::domain::ports::ProfileRepository;
use crate::error::AppError;

/// A caller who passed an access check
#[derive(Debug, Clone)]
pub struct Member {
    pub profile: Profile,
    pub organization_id: OrganizationId,
    pub role: Role,
}

impl Member {
    pub fn user_id(&self) -> UserId {
        self.profile.user_id
    }
}

/// Pure decision over an already-fetched profile
pub fn decide(
    profile: Option<&Profile>,
    organization_id: &OrganizationId,
    action: Action,
) -> AccessDecision {
    let Some(profile) = profile else {
        return AccessDecision::deny("No profile found");
    };
    if profile.organization_id.as_ref() != Some(organization_id) {
        return AccessDecision::deny("Not a member of this organization");
    }
    match profile.role() {
        Some(role) if action.permits(role) => AccessDecision::allow(),
        Some(role) => AccessDecision::deny(format!("Role {} may not {}", role, action)),
        None => AccessDecision::deny(format!("Unknown role: {}", profile.role)),
    }
}

pub struct AccessService {
    profiles: Arc<dyn ProfileRepository>,
}

impl AccessService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Fails closed: a lookup error is a denial
    pub async fn authorize(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
        action: Action,
    ) -> AccessDecision {
        match self.profiles.find_by_user_id(user_id).await {
            Ok(profile) => decide(profile.as_ref(), organization_id, action),
            Err(e) => {
                tracing::error!(error = %e, user_id = %user_id, "Profile lookup failed during authorization");
                AccessDecision::deny("Authorization check failed")
            }
        }
    }

    /// The caller's own profile, if any
    pub async fn profile(&self, user: &SessionUser) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.find_by_user_id(&user.id).await?)
    }

    /// Resolve the caller's organization and check `action` there.
    ///
    /// Maps every denial to 403.
    pub async fn require(&self, user: &SessionUser, action: Action) -> Result<Member, AppError> {
        let profile = match self.profiles.find_by_user_id(&user.id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!(error = %e, user_id = %user.id, "Profile lookup failed during authorization");
                return Err(AppError::Forbidden("Authorization check failed".to_string()));
            }
        };

        let profile = profile.ok_or_else(|| AppError::Forbidden("No profile found".to_string()))?;
        let organization_id = profile
            .organization_id
            .ok_or_else(|| AppError::Forbidden("Not a member of any organization".to_string()))?;

        let decision = decide(Some(&profile), &organization_id, action);
        if !decision.authorized {
            let reason = decision.reason.unwrap_or_default();
            tracing::info!(
                user_id = %user.id,
                organization_id = %organization_id,
                action = %action,
                reason = %reason,
                "Access denied"
            );
            return Err(AppError::Forbidden(reason));
        }

        // decide() only allows parseable roles
        let role = profile
            .role()
            .ok_or_else(|| AppError::Forbidden("Unknown role".to_string()))?;

        Ok(Member {
            profile,
            organization_id,
            role,
        })
    }
}
