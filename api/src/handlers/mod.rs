//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Authenticated handlers take
//! the [`SessionUser`](crate::domain::entities::SessionUser) injected by the
//! session middleware and check their action through the access service.

pub mod applications;
pub mod billing;
pub mod candidates;
pub mod careers;
pub mod documents;
pub mod health;
pub mod integrations;
pub mod interviews;
pub mod jobs;
pub mod me;
pub mod scorecards;
pub mod subscription;
pub mod team;

/// `Cache-Control` for anonymous, cacheable responses
pub const PUBLIC_CACHE_CONTROL: &str = "public, max-age=300, stale-while-revalidate=600";

pub use applications::{list_applications, update_stage};
pub use billing::{checkout, verify, webhook};
pub use candidates::{create_candidate, get_candidate, list_candidates};
pub use careers::{apply, get_career_job, get_career_page, update_settings};
pub use documents::{delete_document, list_documents, upload};
pub use health::health;
pub use integrations::{
    callback, connect, disconnect, list_connections, list_credentials, save_credential,
};
pub use interviews::{create_interview, list_interviews, update_interview};
pub use jobs::{create_job, delete_job, get_job, list_jobs, update_job};
pub use me::me;
pub use scorecards::{
    create_template, delete_template, list_scorecards, list_templates, submit_scorecard,
};
pub use subscription::{get_gate, list_tiers};
pub use team::{change_role, invite, list_team};
