//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use uuid::Uuid;

use crate::app::Member;
use crate::config::{Config, OAuthAppConfig};
use crate::domain::entities::{
    Candidate, CandidateId, Job, JobId, JobStatus, Organization, OrganizationId, Profile, Role,
    SessionUser, SubscriptionTier, UserId,
};

pub const TEST_WEBHOOK_SECRET: &str = "whsec_test";

/// Configuration that never reaches a real service
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/hireloop_test".to_string(),
        port: 0,
        app_base_url: "https://app.test".to_string(),
        auth_url: "https://auth.test".to_string(),
        auth_anon_key: "anon".to_string(),
        session_cookie: "sb-access-token".to_string(),
        storage_url: "https://storage.test".to_string(),
        storage_service_key: "service".to_string(),
        email_api_url: "https://email.test".to_string(),
        email_api_key: Some("email-key".to_string()),
        email_from: "Hireloop <no-reply@hireloop.test>".to_string(),
        payments_api_url: "https://payments.test".to_string(),
        payments_secret_key: Some("sk_test".to_string()),
        payments_webhook_secret: Some(TEST_WEBHOOK_SECRET.to_string()),
        encryption_key: "test-encryption-key".to_string(),
        google: OAuthAppConfig::default(),
        microsoft: OAuthAppConfig::default(),
        zoom: OAuthAppConfig::default(),
        rate_limit_enabled: false,
    }
}

/// Create a test organization with an enabled career page and no subscription
pub fn test_organization() -> Organization {
    let id = OrganizationId::new();
    Organization {
        id,
        name: "Acme Corp".to_string(),
        slug: format!("acme-{}", &id.0.simple().to_string()[..8]),
        logo_url: None,
        website: Some("https://acme.test".to_string()),
        description: Some("We make everything".to_string()),
        career_page_enabled: true,
        career_page_headline: Some("Join Acme".to_string()),
        career_page_intro: None,
        brand_color: Some("#ff6600".to_string()),
        subscription_status: "inactive".to_string(),
        subscription_tier_id: None,
        billing_customer_id: None,
        created_at: Utc::now(),
    }
}

pub fn test_profile(user_id: UserId, organization_id: OrganizationId, role: Role) -> Profile {
    Profile {
        user_id,
        organization_id: Some(organization_id),
        role: role.to_string(),
        full_name: Some("Test User".to_string()),
        email: Some(format!("{}@acme.test", role)),
        avatar_url: None,
        created_at: Utc::now(),
    }
}

pub fn test_session_user(id: UserId) -> SessionUser {
    SessionUser {
        id,
        email: Some(format!("user-{}@acme.test", &id.0.simple().to_string()[..8])),
    }
}

/// A caller who already passed an access check
pub fn test_member(user_id: UserId, organization_id: OrganizationId, role: Role) -> Member {
    Member {
        profile: test_profile(user_id, organization_id, role),
        organization_id,
        role,
    }
}

pub fn test_job(organization_id: OrganizationId, status: JobStatus) -> Job {
    Job {
        id: JobId::new(),
        organization_id,
        title: "Senior Engineer".to_string(),
        department: Some("Engineering".to_string()),
        location: Some("Berlin".to_string()),
        employment_type: Some("full_time".to_string()),
        description: Some("Build the product".to_string()),
        salary_min: Some(80_000),
        salary_max: Some(120_000),
        status: status.to_string(),
        is_remote: true,
        published_at: (status == JobStatus::Published).then(Utc::now),
        created_by: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub fn test_candidate(organization_id: OrganizationId, email: &str) -> Candidate {
    Candidate {
        id: CandidateId::new(),
        organization_id,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone: None,
        linkedin_url: None,
        resume_url: None,
        source: Some("manual".to_string()),
        created_at: Utc::now(),
    }
}

/// The same tier on every call
pub fn test_tier() -> SubscriptionTier {
    SubscriptionTier {
        id: Uuid::from_u128(0x7e57_0000_0000_4000_8000_0000_0000_0001),
        name: "Growth".to_string(),
        description: Some("For growing teams".to_string()),
        price_cents: 9900,
        currency: "usd".to_string(),
        interval: "month".to_string(),
        max_jobs: Some(25),
        max_users: Some(10),
        features: vec!["Career page".to_string(), "Scorecards".to_string()],
        is_active: true,
        sort_order: 1,
    }
}
