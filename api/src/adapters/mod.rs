//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod http;
pub mod postgres;

pub use http::{
    HttpOAuthClient, ResendEmailSender, StripePaymentGateway, SupabaseSessionVerifier,
    SupabaseStorage,
};
pub use postgres::{
    PostgresApplicationRepository, PostgresCandidateRepository, PostgresDocumentRepository,
    PostgresHealth, PostgresIntegrationRepository, PostgresInterviewRepository,
    PostgresInvitationRepository, PostgresJobRepository, PostgresOrganizationRepository,
    PostgresProfileRepository, PostgresScorecardRepository, PostgresSubscriptionTierRepository,
};
