//! Application layer
//!
//! Services that combine ports into the operations handlers expose.

pub mod access_service;
pub mod billing_service;
pub mod career_service;
pub mod document_service;
pub mod emails;
pub mod integration_service;
pub mod secrets;
pub mod subscription_service;
pub mod team_service;
pub mod validation;

pub use access_service::{AccessService, Member};
pub use billing_service::{verify_webhook_signature, BillingService, WebhookOutcome};
pub use career_service::{ApplyRequest, CareerJob, CareerPage, CareerService, PublicOrganization};
pub use document_service::{Bucket, DocumentService, UploadForm, UploadResult, MAX_UPLOAD_BYTES};
pub use integration_service::{
    parse_provider, CallbackParams, IntegrationService, OAuthState, SaveCredentialRequest,
};
pub use secrets::SecretBox;
pub use subscription_service::{GateView, SubscriptionService};
pub use team_service::{InviteRequest, TeamService};
