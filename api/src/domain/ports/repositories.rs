//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//! Every tenant-owned lookup takes the organization id so a row from another
//! organization is indistinguishable from a missing one.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    Application, ApplicationId, ApplicationStage, CalendarConnection, Candidate, CandidateId,
    CareerPageUpdate, Document, IntegrationCredential, Interview, InterviewDraft, InterviewId,
    InterviewUpdate, Invitation, Job, JobId, JobStatus, JobUpdate, NewApplication,
    NewCalendarConnection, NewCandidate, NewDocument, NewInvitation, NewJob, NewScorecardTemplate,
    OAuthProvider, Organization, OrganizationId, Profile, Role, SaveIntegrationCredential,
    Scorecard, ScorecardDraft, ScorecardTemplate, SubscriptionStatus, SubscriptionTier, UserId,
};
use crate::error::DomainError;

/// Repository for `organizations`
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError>;

    /// Find an organization by its public career page slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError>;

    /// Find an organization by its payment processor customer id
    async fn find_by_billing_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Organization>, DomainError>;

    /// Apply career page edits, returning the updated row
    async fn update_career_page(
        &self,
        id: &OrganizationId,
        update: &CareerPageUpdate,
    ) -> Result<Option<Organization>, DomainError>;

    /// Record the billing state; `None` leaves tier / customer unchanged
    async fn update_subscription(
        &self,
        id: &OrganizationId,
        status: SubscriptionStatus,
        tier_id: Option<Uuid>,
        customer_id: Option<&str>,
    ) -> Result<(), DomainError>;
}

/// Repository for `profiles`
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Profile>, DomainError>;

    /// Change a member's role; returns false when no such member exists
    async fn update_role(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        role: Role,
    ) -> Result<bool, DomainError>;
}

/// Repository for `jobs`
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>, DomainError>;

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
    ) -> Result<Option<Job>, DomainError>;

    async fn create(
        &self,
        organization_id: &OrganizationId,
        job: &NewJob,
        created_by: &UserId,
    ) -> Result<Job, DomainError>;

    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
        update: &JobUpdate,
    ) -> Result<Option<Job>, DomainError>;

    /// Returns false when nothing was deleted
    async fn delete(&self, organization_id: &OrganizationId, id: &JobId)
        -> Result<bool, DomainError>;
}

/// Repository for `candidates`
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// List candidates, optionally filtered by a name/e-mail substring
    async fn list(
        &self,
        organization_id: &OrganizationId,
        search: Option<&str>,
    ) -> Result<Vec<Candidate>, DomainError>;

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &CandidateId,
    ) -> Result<Option<Candidate>, DomainError>;

    async fn find_by_email(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Candidate>, DomainError>;

    async fn create(
        &self,
        organization_id: &OrganizationId,
        candidate: &NewCandidate,
    ) -> Result<Candidate, DomainError>;
}

/// Repository for `applications`
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        job_id: Option<&JobId>,
        stage: Option<ApplicationStage>,
    ) -> Result<Vec<Application>, DomainError>;

    async fn list_by_candidate(
        &self,
        organization_id: &OrganizationId,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, DomainError>;

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError>;

    async fn find_by_job_and_candidate(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Result<Option<Application>, DomainError>;

    async fn create(&self, application: &NewApplication) -> Result<Application, DomainError>;

    async fn update_stage(
        &self,
        organization_id: &OrganizationId,
        id: &ApplicationId,
        stage: ApplicationStage,
    ) -> Result<Option<Application>, DomainError>;
}

/// Repository for `interviews`
#[async_trait]
pub trait InterviewRepository: Send + Sync {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        application_id: Option<&ApplicationId>,
    ) -> Result<Vec<Interview>, DomainError>;

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &InterviewId,
    ) -> Result<Option<Interview>, DomainError>;

    async fn create(&self, interview: &InterviewDraft) -> Result<Interview, DomainError>;

    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &InterviewId,
        update: &InterviewUpdate,
    ) -> Result<Option<Interview>, DomainError>;
}

/// Repository for `scorecard_templates` and `scorecards`
#[async_trait]
pub trait ScorecardRepository: Send + Sync {
    async fn list_templates(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<ScorecardTemplate>, DomainError>;

    async fn find_template(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<Option<ScorecardTemplate>, DomainError>;

    async fn create_template(
        &self,
        organization_id: &OrganizationId,
        template: &NewScorecardTemplate,
    ) -> Result<ScorecardTemplate, DomainError>;

    async fn delete_template(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<bool, DomainError>;

    async fn list_scorecards(
        &self,
        organization_id: &OrganizationId,
        interview_id: &InterviewId,
    ) -> Result<Vec<Scorecard>, DomainError>;

    async fn create_scorecard(&self, scorecard: &ScorecardDraft)
        -> Result<Scorecard, DomainError>;
}

/// Repository for `documents`
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn list_by_candidate(
        &self,
        organization_id: &OrganizationId,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Document>, DomainError>;

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<Option<Document>, DomainError>;

    async fn create(&self, document: &NewDocument) -> Result<Document, DomainError>;

    async fn delete(&self, organization_id: &OrganizationId, id: &Uuid)
        -> Result<bool, DomainError>;
}

/// Repository for `integration_credentials` and `calendar_connections`
#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    async fn list_credentials(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<IntegrationCredential>, DomainError>;

    /// Active credential for a provider together with its sealed client secret
    async fn find_active_credential(
        &self,
        organization_id: &OrganizationId,
        provider: OAuthProvider,
    ) -> Result<Option<(IntegrationCredential, String)>, DomainError>;

    /// Insert or replace the credential for (organization, provider)
    async fn save_credential(
        &self,
        credential: &SaveIntegrationCredential,
    ) -> Result<IntegrationCredential, DomainError>;

    async fn list_connections(&self, user_id: &UserId)
        -> Result<Vec<CalendarConnection>, DomainError>;

    /// Insert or replace the connection for (user, provider)
    async fn upsert_connection(
        &self,
        connection: &NewCalendarConnection,
    ) -> Result<CalendarConnection, DomainError>;

    async fn delete_connection(
        &self,
        user_id: &UserId,
        provider: OAuthProvider,
    ) -> Result<bool, DomainError>;
}

/// Repository for `subscription_tiers`
#[async_trait]
pub trait SubscriptionTierRepository: Send + Sync {
    /// Active tiers ordered by `sort_order`
    async fn list_active(&self) -> Result<Vec<SubscriptionTier>, DomainError>;

    async fn find(&self, id: &Uuid) -> Result<Option<SubscriptionTier>, DomainError>;
}

/// Repository for `invitations`
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Unaccepted, unexpired invitation for an e-mail address
    async fn find_pending(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Invitation>, DomainError>;

    async fn create(&self, invitation: &NewInvitation) -> Result<Invitation, DomainError>;
}
