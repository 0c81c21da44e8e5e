//! Subscription gate service
//!
//! Looks up the viewer's role and organization subscription and hands them to
//! [`evaluate_gate`]. Re-evaluated on every request.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{
    evaluate_gate, GateState, SessionUser, SubscriptionStatus, SubscriptionTier,
};
use crate::domain::ports::{OrganizationRepository, ProfileRepository, SubscriptionTierRepository};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateView {
    pub state: GateState,
    pub show_banner: bool,
    pub show_modal: bool,
    pub subscription_active: bool,
    pub subscription_status: SubscriptionStatus,
}

impl GateView {
    fn new(state: GateState, status: SubscriptionStatus) -> Self {
        Self {
            state,
            show_banner: state.shows_banner(),
            show_modal: state.shows_modal(),
            subscription_active: status.is_active(),
            subscription_status: status,
        }
    }
}

pub struct SubscriptionService {
    profiles: Arc<dyn ProfileRepository>,
    organizations: Arc<dyn OrganizationRepository>,
    tiers: Arc<dyn SubscriptionTierRepository>,
}

impl SubscriptionService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        organizations: Arc<dyn OrganizationRepository>,
        tiers: Arc<dyn SubscriptionTierRepository>,
    ) -> Self {
        Self {
            profiles,
            organizations,
            tiers,
        }
    }

    /// Gate decision for `route`. A viewer without a profile or organization
    /// is evaluated as inactive with no role.
    pub async fn gate(&self, user: &SessionUser, route: &str) -> Result<GateView, AppError> {
        let profile = self.profiles.find_by_user_id(&user.id).await?;
        let role = profile.as_ref().and_then(|p| p.role());

        let status = match profile.as_ref().and_then(|p| p.organization_id) {
            Some(org_id) => self
                .organizations
                .find_by_id(&org_id)
                .await?
                .map(|org| org.subscription())
                .unwrap_or_default(),
            None => SubscriptionStatus::Inactive,
        };

        let state = evaluate_gate(status.is_active(), role, route);
        tracing::debug!(user_id = %user.id, route = %route, state = ?state, "Subscription gate evaluated");
        Ok(GateView::new(state, status))
    }

    pub async fn list_tiers(&self) -> Result<Vec<SubscriptionTier>, AppError> {
        Ok(self.tiers.list_active().await?)
    }
}
