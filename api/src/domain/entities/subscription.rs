//! Subscription status, tiers and the subscription gate

use serde::{Deserialize, Serialize};

use super::Role;
use crate::domain::transform::{FromRow, Row};

/// Route that stays reachable regardless of billing state
pub const ALWAYS_ACCESSIBLE_ROUTES: &[&str] = &["/dashboard"];

/// Billing state stored on `organizations.subscription_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    #[default]
    Inactive,
}

impl SubscriptionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }

    /// Lenient parse; anything unrecognised is `Inactive`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" | "unpaid" => SubscriptionStatus::PastDue,
            "canceled" | "cancelled" => SubscriptionStatus::Canceled,
            _ => SubscriptionStatus::Inactive,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Inactive => "inactive",
        };
        write!(f, "{}", s)
    }
}

/// What a viewer gets to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    FullAccess,
    BannerOnly,
    Restricted,
}

impl GateState {
    pub fn shows_banner(&self) -> bool {
        matches!(self, GateState::BannerOnly)
    }

    pub fn shows_modal(&self) -> bool {
        matches!(self, GateState::Restricted)
    }
}

fn is_always_accessible(route: &str) -> bool {
    let trimmed = route.trim_end_matches('/');
    ALWAYS_ACCESSIBLE_ROUTES.contains(&trimmed)
}

/// Decide the gate state for one navigation.
///
/// `role` is `None` when the viewer's role string is unknown; such viewers
/// are treated as non-admins.
pub fn evaluate_gate(subscription_active: bool, role: Option<Role>, route: &str) -> GateState {
    if subscription_active {
        return GateState::FullAccess;
    }
    match role {
        Some(r) if r.is_platform_admin() => GateState::FullAccess,
        Some(r) if r.is_org_admin() => GateState::BannerOnly,
        _ if is_always_accessible(route) => GateState::BannerOnly,
        _ => GateState::Restricted,
    }
}

/// A row of `subscription_tiers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTier {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub interval: String,
    pub max_jobs: Option<i64>,
    pub max_users: Option<i64>,
    pub features: Vec<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl FromRow for SubscriptionTier {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        SubscriptionTier {
            id: r.uuid("id"),
            name: r.string("name"),
            description: r.opt_string("description"),
            price_cents: r.i64("price_cents"),
            currency: r.opt_string("currency").unwrap_or_else(|| "usd".to_string()),
            interval: r.opt_string("interval").unwrap_or_else(|| "month".to_string()),
            max_jobs: r.opt_i64("max_jobs"),
            max_users: r.opt_i64("max_users"),
            features: r.string_list("features"),
            is_active: r.bool("is_active"),
            sort_order: r.i32("sort_order"),
        }
    }
}
