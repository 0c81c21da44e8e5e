//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod external;
pub mod repositories;

pub use external::{
    CheckoutRequest, CheckoutSession, DatabaseHealth, EmailSender, OAuthClient, OAuthExchange,
    OAuthTokens, ObjectStorage, OutboundEmail, PaymentGateway, SessionVerifier,
};
pub use repositories::{
    ApplicationRepository, CandidateRepository, DocumentRepository, IntegrationRepository,
    InterviewRepository, InvitationRepository, JobRepository, OrganizationRepository,
    ProfileRepository, ScorecardRepository, SubscriptionTierRepository,
};
