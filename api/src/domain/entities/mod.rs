//! Domain entities
//!
//! Records shaped for the application. Each one is built from an untyped
//! database row by the transform layer (`crate::domain::transform`).

pub mod access;
pub mod application;
pub mod candidate;
pub mod document;
pub mod integration;
pub mod interview;
pub mod invitation;
pub mod job;
pub mod organization;
pub mod profile;
pub mod scorecard;
pub mod subscription;

pub use access::{AccessDecision, Action};
pub use application::{Application, ApplicationStage, NewApplication};
pub use candidate::{Candidate, NewCandidate};
pub use document::{Document, NewDocument};
pub use integration::{
    CalendarConnection, IntegrationCredential, NewCalendarConnection, OAuthProvider,
    SaveIntegrationCredential,
};
pub use interview::{Interview, InterviewDraft, InterviewStatus, InterviewUpdate, NewInterview};
pub use invitation::{Invitation, NewInvitation};
pub use job::{Job, JobStatus, JobUpdate, NewJob};
pub use organization::{CareerPageUpdate, Organization};
pub use profile::{Profile, Role, SessionUser};
pub use scorecard::{
    NewScorecard, NewScorecardTemplate, Scorecard, ScorecardDraft, ScorecardTemplate,
};
pub use subscription::{evaluate_gate, GateState, SubscriptionStatus, SubscriptionTier};

/// Declares a UUID-backed identifier newtype.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Tenant boundary; every row is scoped by one
    OrganizationId
);
uuid_id!(
    /// Auth provider user id
    UserId
);
uuid_id!(JobId);
uuid_id!(CandidateId);
uuid_id!(ApplicationId);
uuid_id!(InterviewId);
