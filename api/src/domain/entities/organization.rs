//! Organization domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrganizationId, SubscriptionStatus};
use crate::domain::transform::{FromRow, Row};

/// A tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub career_page_enabled: bool,
    pub career_page_headline: Option<String>,
    pub career_page_intro: Option<String>,
    pub brand_color: Option<String>,
    pub subscription_status: String,
    pub subscription_tier_id: Option<uuid::Uuid>,
    /// Payment processor customer id
    pub billing_customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn subscription(&self) -> SubscriptionStatus {
        SubscriptionStatus::parse(&self.subscription_status)
    }

    pub fn is_subscription_active(&self) -> bool {
        self.subscription().is_active()
    }
}

impl FromRow for Organization {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Organization {
            id: r.uuid("id"),
            name: r.string("name"),
            slug: r.string("slug"),
            logo_url: r.opt_string("logo_url"),
            website: r.opt_string("website"),
            description: r.opt_string("description"),
            career_page_enabled: r.bool("career_page_enabled"),
            career_page_headline: r.opt_string("career_page_headline"),
            career_page_intro: r.opt_string("career_page_intro"),
            brand_color: r.opt_string("brand_color"),
            subscription_status: r
                .opt_string("subscription_status")
                .unwrap_or_else(|| SubscriptionStatus::Inactive.to_string()),
            subscription_tier_id: r.opt_uuid("subscription_tier_id"),
            billing_customer_id: r.opt_string("billing_customer_id"),
            created_at: r.timestamp("created_at"),
        }
    }
}

/// Editable career page fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPageUpdate {
    pub career_page_enabled: Option<bool>,
    pub career_page_headline: Option<String>,
    pub career_page_intro: Option<String>,
    pub brand_color: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
}
