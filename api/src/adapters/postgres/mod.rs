//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM raw statements and PostgreSQL.

pub mod application_repo;
pub mod candidate_repo;
pub mod document_repo;
pub mod health;
pub mod integration_repo;
pub mod interview_repo;
pub mod invitation_repo;
pub mod job_repo;
pub mod organization_repo;
pub mod profile_repo;
mod query;
pub mod scorecard_repo;
pub mod subscription_tier_repo;


pub use application_repo::PostgresApplicationRepository;
pub use candidate_repo::PostgresCandidateRepository;
pub use document_repo::PostgresDocumentRepository;
pub use health::PostgresHealth;
pub use integration_repo::PostgresIntegrationRepository;
pub use interview_repo::PostgresInterviewRepository;
pub use invitation_repo::PostgresInvitationRepository;
pub use job_repo::PostgresJobRepository;
pub use organization_repo::PostgresOrganizationRepository;
pub use profile_repo::PostgresProfileRepository;
pub use scorecard_repo::PostgresScorecardRepository;
pub use subscription_tier_repo::PostgresSubscriptionTierRepository;
