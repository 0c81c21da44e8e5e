//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::entities::{
    Application, ApplicationId, ApplicationStage, CalendarConnection, Candidate, CandidateId,
    CareerPageUpdate, Document, IntegrationCredential, Interview, InterviewDraft,
    InterviewId, InterviewStatus, InterviewUpdate, Invitation, Job, JobId, JobStatus, JobUpdate,
    NewApplication, NewCalendarConnection, NewCandidate, NewDocument, NewInvitation, NewJob,
    NewScorecardTemplate, OAuthProvider, Organization, OrganizationId, Profile, Role,
    SaveIntegrationCredential, Scorecard, ScorecardDraft, ScorecardTemplate, SessionUser,
    SubscriptionStatus, SubscriptionTier, UserId,
};
use crate::domain::ports::{
    ApplicationRepository, CandidateRepository, CheckoutRequest, CheckoutSession,
    DatabaseHealth, DocumentRepository, EmailSender, IntegrationRepository, InterviewRepository,
    InvitationRepository, JobRepository, OAuthClient, OAuthExchange, OAuthTokens, ObjectStorage,
    OrganizationRepository, OutboundEmail, PaymentGateway, ProfileRepository,
    ScorecardRepository, SessionVerifier, SubscriptionTierRepository,
};
use crate::error::{DomainError, ExternalError};

fn unavailable() -> DomainError {
    DomainError::Database("connection refused".to_string())
}

fn upstream_down() -> ExternalError {
    ExternalError::Api {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

// ============================================================================
// In-Memory Organization Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Arc<RwLock<HashMap<OrganizationId, Organization>>>,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an organization for testing
    pub fn with_organization(self, organization: Organization) -> Self {
        self.organizations
            .write()
            .unwrap()
            .insert(organization.id, organization);
        self
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError> {
        Ok(self.organizations.read().unwrap().get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError> {
        Ok(self
            .organizations
            .read()
            .unwrap()
            .values()
            .find(|o| o.slug == slug)
            .cloned())
    }

    async fn find_by_billing_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Organization>, DomainError> {
        Ok(self
            .organizations
            .read()
            .unwrap()
            .values()
            .find(|o| o.billing_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }

    async fn update_career_page(
        &self,
        id: &OrganizationId,
        update: &CareerPageUpdate,
    ) -> Result<Option<Organization>, DomainError> {
        let mut organizations = self.organizations.write().unwrap();
        let Some(org) = organizations.get_mut(id) else {
            return Ok(None);
        };
        if let Some(enabled) = update.career_page_enabled {
            org.career_page_enabled = enabled;
        }
        if let Some(ref headline) = update.career_page_headline {
            org.career_page_headline = Some(headline.clone());
        }
        if let Some(ref intro) = update.career_page_intro {
            org.career_page_intro = Some(intro.clone());
        }
        if let Some(ref color) = update.brand_color {
            org.brand_color = Some(color.clone());
        }
        if let Some(ref logo) = update.logo_url {
            org.logo_url = Some(logo.clone());
        }
        if let Some(ref description) = update.description {
            org.description = Some(description.clone());
        }
        if let Some(ref website) = update.website {
            org.website = Some(website.clone());
        }
        Ok(Some(org.clone()))
    }

    async fn update_subscription(
        &self,
        id: &OrganizationId,
        status: SubscriptionStatus,
        tier_id: Option<Uuid>,
        customer_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut organizations = self.organizations.write().unwrap();
        let org = organizations
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Organization {}", id)))?;
        org.subscription_status = status.to_string();
        if tier_id.is_some() {
            org.subscription_tier_id = tier_id;
        }
        if let Some(customer) = customer_id {
            org.billing_customer_id = Some(customer.to_string());
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory Profile Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
    fail: bool,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        self.insert(profile);
        self
    }

    /// Every call returns a database error
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn insert(&self, profile: Profile) {
        self.profiles.write().unwrap().insert(profile.user_id, profile);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        if self.fail {
            return Err(unavailable());
        }
        Ok(self.profiles.read().unwrap().get(user_id).cloned())
    }

    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Profile>, DomainError> {
        if self.fail {
            return Err(unavailable());
        }
        let mut profiles: Vec<Profile> = self
            .profiles
            .read()
            .unwrap()
            .values()
            .filter(|p| p.organization_id.as_ref() == Some(organization_id))
            .cloned()
            .collect();
        profiles.sort_by_key(|p| p.created_at);
        Ok(profiles)
    }

    async fn update_role(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        role: Role,
    ) -> Result<bool, DomainError> {
        if self.fail {
            return Err(unavailable());
        }
        let mut profiles = self.profiles.write().unwrap();
        match profiles.get_mut(user_id) {
            Some(p) if p.organization_id.as_ref() == Some(organization_id) => {
                p.role = role.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ============================================================================
// In-Memory Job Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job(self, job: Job) -> Self {
        self.jobs.write().unwrap().insert(job.id, job);
        self
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>, DomainError> {
        let mut jobs: Vec<Job> = self
            .jobs
            .read()
            .unwrap()
            .values()
            .filter(|j| j.organization_id == *organization_id)
            .filter(|j| status.map_or(true, |s| j.status == s.to_string()))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
    ) -> Result<Option<Job>, DomainError> {
        Ok(self
            .jobs
            .read()
            .unwrap()
            .get(id)
            .filter(|j| j.organization_id == *organization_id)
            .cloned())
    }

    async fn create(
        &self,
        organization_id: &OrganizationId,
        job: &NewJob,
        created_by: &UserId,
    ) -> Result<Job, DomainError> {
        let status = job.status.unwrap_or(JobStatus::Draft);
        let created = Job {
            id: JobId::new(),
            organization_id: *organization_id,
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            employment_type: job.employment_type.clone(),
            description: job.description.clone(),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            status: status.to_string(),
            is_remote: job.is_remote,
            published_at: (status == JobStatus::Published).then(Utc::now),
            created_by: Some(*created_by),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.jobs.write().unwrap().insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
        update: &JobUpdate,
    ) -> Result<Option<Job>, DomainError> {
        let mut jobs = self.jobs.write().unwrap();
        let Some(job) = jobs
            .get_mut(id)
            .filter(|j| j.organization_id == *organization_id)
        else {
            return Ok(None);
        };
        if let Some(ref title) = update.title {
            job.title = title.clone();
        }
        if update.department.is_some() {
            job.department = update.department.clone();
        }
        if update.location.is_some() {
            job.location = update.location.clone();
        }
        if update.employment_type.is_some() {
            job.employment_type = update.employment_type.clone();
        }
        if update.description.is_some() {
            job.description = update.description.clone();
        }
        if update.salary_min.is_some() {
            job.salary_min = update.salary_min;
        }
        if update.salary_max.is_some() {
            job.salary_max = update.salary_max;
        }
        if let Some(is_remote) = update.is_remote {
            job.is_remote = is_remote;
        }
        if let Some(status) = update.status {
            if status == JobStatus::Published && job.published_at.is_none() {
                job.published_at = Some(Utc::now());
            }
            job.status = status.to_string();
        }
        job.updated_at = Some(Utc::now());
        Ok(Some(job.clone()))
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
    ) -> Result<bool, DomainError> {
        let mut jobs = self.jobs.write().unwrap();
        if jobs
            .get(id)
            .is_some_and(|j| j.organization_id == *organization_id)
        {
            jobs.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}

// ============================================================================
// In-Memory Candidate Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCandidateRepository {
    candidates: Arc<RwLock<HashMap<CandidateId, Candidate>>>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate(self, candidate: Candidate) -> Self {
        self.candidates
            .write()
            .unwrap()
            .insert(candidate.id, candidate);
        self
    }

    pub fn count(&self) -> usize {
        self.candidates.read().unwrap().len()
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        search: Option<&str>,
    ) -> Result<Vec<Candidate>, DomainError> {
        let needle = search.map(str::to_lowercase);
        let mut candidates: Vec<Candidate> = self
            .candidates
            .read()
            .unwrap()
            .values()
            .filter(|c| c.organization_id == *organization_id)
            .filter(|c| match needle {
                Some(ref n) => {
                    c.full_name().to_lowercase().contains(n) || c.email.to_lowercase().contains(n)
                }
                None => true,
            })
            .cloned()
            .collect();
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(candidates)
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &CandidateId,
    ) -> Result<Option<Candidate>, DomainError> {
        Ok(self
            .candidates
            .read()
            .unwrap()
            .get(id)
            .filter(|c| c.organization_id == *organization_id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Candidate>, DomainError> {
        Ok(self
            .candidates
            .read()
            .unwrap()
            .values()
            .find(|c| c.organization_id == *organization_id && c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(
        &self,
        organization_id: &OrganizationId,
        candidate: &NewCandidate,
    ) -> Result<Candidate, DomainError> {
        let created = Candidate {
            id: CandidateId::new(),
            organization_id: *organization_id,
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            linkedin_url: candidate.linkedin_url.clone(),
            resume_url: candidate.resume_url.clone(),
            source: candidate.source.clone(),
            created_at: Utc::now(),
        };
        self.candidates
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }
}

// ============================================================================
// In-Memory Application Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: Arc<RwLock<HashMap<ApplicationId, Application>>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.applications.read().unwrap().len()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        job_id: Option<&JobId>,
        stage: Option<ApplicationStage>,
    ) -> Result<Vec<Application>, DomainError> {
        Ok(self
            .applications
            .read()
            .unwrap()
            .values()
            .filter(|a| a.organization_id == *organization_id)
            .filter(|a| job_id.map_or(true, |j| a.job_id == *j))
            .filter(|a| stage.map_or(true, |s| a.stage == s.to_string()))
            .cloned()
            .collect())
    }

    async fn list_by_candidate(
        &self,
        organization_id: &OrganizationId,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, DomainError> {
        Ok(self
            .applications
            .read()
            .unwrap()
            .values()
            .filter(|a| a.organization_id == *organization_id && a.candidate_id == *candidate_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError> {
        Ok(self
            .applications
            .read()
            .unwrap()
            .get(id)
            .filter(|a| a.organization_id == *organization_id)
            .cloned())
    }

    async fn find_by_job_and_candidate(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Result<Option<Application>, DomainError> {
        Ok(self
            .applications
            .read()
            .unwrap()
            .values()
            .find(|a| a.job_id == *job_id && a.candidate_id == *candidate_id)
            .cloned())
    }

    async fn create(&self, application: &NewApplication) -> Result<Application, DomainError> {
        let created = Application {
            id: ApplicationId::new(),
            organization_id: application.organization_id,
            job_id: application.job_id,
            candidate_id: application.candidate_id,
            stage: ApplicationStage::Applied.to_string(),
            cover_letter: application.cover_letter.clone(),
            rejected: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.applications
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_stage(
        &self,
        organization_id: &OrganizationId,
        id: &ApplicationId,
        stage: ApplicationStage,
    ) -> Result<Option<Application>, DomainError> {
        let mut applications = self.applications.write().unwrap();
        let Some(application) = applications
            .get_mut(id)
            .filter(|a| a.organization_id == *organization_id)
        else {
            return Ok(None);
        };
        application.stage = stage.to_string();
        application.rejected = stage == ApplicationStage::Rejected;
        application.updated_at = Some(Utc::now());
        Ok(Some(application.clone()))
    }
}

// ============================================================================
// In-Memory Interview Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryInterviewRepository {
    interviews: Arc<RwLock<HashMap<InterviewId, Interview>>>,
}

impl InMemoryInterviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InterviewRepository for InMemoryInterviewRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        application_id: Option<&ApplicationId>,
    ) -> Result<Vec<Interview>, DomainError> {
        let mut interviews: Vec<Interview> = self
            .interviews
            .read()
            .unwrap()
            .values()
            .filter(|i| i.organization_id == *organization_id)
            .filter(|i| application_id.map_or(true, |a| i.application_id == *a))
            .cloned()
            .collect();
        interviews.sort_by_key(|i| i.scheduled_at);
        Ok(interviews)
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &InterviewId,
    ) -> Result<Option<Interview>, DomainError> {
        Ok(self
            .interviews
            .read()
            .unwrap()
            .get(id)
            .filter(|i| i.organization_id == *organization_id)
            .cloned())
    }

    async fn create(&self, interview: &InterviewDraft) -> Result<Interview, DomainError> {
        let created = Interview {
            id: InterviewId::new(),
            organization_id: interview.organization_id,
            application_id: interview.application_id,
            interviewer_id: interview.interviewer_id,
            scheduled_at: interview.scheduled_at,
            duration_minutes: interview.duration_minutes,
            location: interview.location.clone(),
            meeting_url: interview.meeting_url.clone(),
            provider: interview.provider.clone(),
            status: InterviewStatus::Scheduled.to_string(),
            notes: interview.notes.clone(),
            created_at: Utc::now(),
        };
        self.interviews
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &InterviewId,
        update: &InterviewUpdate,
    ) -> Result<Option<Interview>, DomainError> {
        let mut interviews = self.interviews.write().unwrap();
        let Some(interview) = interviews
            .get_mut(id)
            .filter(|i| i.organization_id == *organization_id)
        else {
            return Ok(None);
        };
        if let Some(at) = update.scheduled_at {
            interview.scheduled_at = at;
        }
        if let Some(minutes) = update.duration_minutes {
            interview.duration_minutes = minutes;
        }
        if let Some(status) = update.status {
            interview.status = status.to_string();
        }
        if update.notes.is_some() {
            interview.notes = update.notes.clone();
        }
        if update.meeting_url.is_some() {
            interview.meeting_url = update.meeting_url.clone();
        }
        Ok(Some(interview.clone()))
    }
}

// ============================================================================
// In-Memory Scorecard Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryScorecardRepository {
    templates: Arc<RwLock<HashMap<Uuid, ScorecardTemplate>>>,
    scorecards: Arc<RwLock<Vec<Scorecard>>>,
}

impl InMemoryScorecardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScorecardRepository for InMemoryScorecardRepository {
    async fn list_templates(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<ScorecardTemplate>, DomainError> {
        Ok(self
            .templates
            .read()
            .unwrap()
            .values()
            .filter(|t| t.organization_id == *organization_id)
            .cloned()
            .collect())
    }

    async fn find_template(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<Option<ScorecardTemplate>, DomainError> {
        Ok(self
            .templates
            .read()
            .unwrap()
            .get(id)
            .filter(|t| t.organization_id == *organization_id)
            .cloned())
    }

    async fn create_template(
        &self,
        organization_id: &OrganizationId,
        template: &NewScorecardTemplate,
    ) -> Result<ScorecardTemplate, DomainError> {
        let created = ScorecardTemplate {
            id: Uuid::new_v4(),
            organization_id: *organization_id,
            name: template.name.clone(),
            criteria: template.criteria.clone(),
            is_default: template.is_default,
            created_at: Utc::now(),
        };
        self.templates
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_template(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<bool, DomainError> {
        let mut templates = self.templates.write().unwrap();
        if templates
            .get(id)
            .is_some_and(|t| t.organization_id == *organization_id)
        {
            templates.remove(id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn list_scorecards(
        &self,
        organization_id: &OrganizationId,
        interview_id: &InterviewId,
    ) -> Result<Vec<Scorecard>, DomainError> {
        Ok(self
            .scorecards
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.organization_id == *organization_id && s.interview_id == *interview_id)
            .cloned()
            .collect())
    }

    async fn create_scorecard(
        &self,
        scorecard: &ScorecardDraft,
    ) -> Result<Scorecard, DomainError> {
        let created = Scorecard {
            id: Uuid::new_v4(),
            organization_id: scorecard.organization_id,
            interview_id: scorecard.interview_id,
            template_id: scorecard.template_id,
            submitted_by: Some(scorecard.submitted_by),
            ratings: scorecard.ratings.clone(),
            recommendation: scorecard.recommendation.clone(),
            comments: scorecard.comments.clone(),
            created_at: Utc::now(),
        };
        self.scorecards.write().unwrap().push(created.clone());
        Ok(created)
    }
}

// ============================================================================
// In-Memory Document Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<Uuid, Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn list_by_candidate(
        &self,
        organization_id: &OrganizationId,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Document>, DomainError> {
        Ok(self
            .documents
            .read()
            .unwrap()
            .values()
            .filter(|d| {
                d.organization_id == *organization_id && d.candidate_id == Some(*candidate_id)
            })
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<Option<Document>, DomainError> {
        Ok(self
            .documents
            .read()
            .unwrap()
            .get(id)
            .filter(|d| d.organization_id == *organization_id)
            .cloned())
    }

    async fn create(&self, document: &NewDocument) -> Result<Document, DomainError> {
        let created = Document {
            id: Uuid::new_v4(),
            organization_id: document.organization_id,
            candidate_id: document.candidate_id,
            bucket: document.bucket.clone(),
            path: document.path.clone(),
            file_name: document.file_name.clone(),
            content_type: document.content_type.clone(),
            size_bytes: document.size_bytes,
            uploaded_by: Some(document.uploaded_by),
            created_at: Utc::now(),
        };
        self.documents
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<bool, DomainError> {
        let mut documents = self.documents.write().unwrap();
        if documents
            .get(id)
            .is_some_and(|d| d.organization_id == *organization_id)
        {
            documents.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}

// ============================================================================
// In-Memory Integration Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryIntegrationRepository {
    /// (organization, provider) -> (credential, sealed secret)
    credentials: Arc<RwLock<HashMap<(OrganizationId, OAuthProvider), (IntegrationCredential, String)>>>,
    /// (user, provider) -> (connection, sealed access token)
    connections: Arc<RwLock<HashMap<(UserId, OAuthProvider), (CalendarConnection, String)>>>,
}

impl InMemoryIntegrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sealed access token stored for a connection
    pub fn sealed_access_token(&self, user_id: &UserId, provider: OAuthProvider) -> Option<String> {
        self.connections
            .read()
            .unwrap()
            .get(&(*user_id, provider))
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl IntegrationRepository for InMemoryIntegrationRepository {
    async fn list_credentials(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<IntegrationCredential>, DomainError> {
        Ok(self
            .credentials
            .read()
            .unwrap()
            .iter()
            .filter(|((org, _), _)| org == organization_id)
            .map(|(_, (credential, _))| credential.clone())
            .collect())
    }

    async fn find_active_credential(
        &self,
        organization_id: &OrganizationId,
        provider: OAuthProvider,
    ) -> Result<Option<(IntegrationCredential, String)>, DomainError> {
        Ok(self
            .credentials
            .read()
            .unwrap()
            .get(&(*organization_id, provider))
            .filter(|(credential, _)| credential.is_active)
            .cloned())
    }

    async fn save_credential(
        &self,
        credential: &SaveIntegrationCredential,
    ) -> Result<IntegrationCredential, DomainError> {
        let key = (credential.organization_id, credential.provider);
        let mut credentials = self.credentials.write().unwrap();
        let id = credentials
            .get(&key)
            .map(|(existing, _)| existing.id)
            .unwrap_or_else(Uuid::new_v4);
        let saved = IntegrationCredential {
            id,
            organization_id: credential.organization_id,
            provider: credential.provider.to_string(),
            client_id: credential.client_id.clone(),
            redirect_uri: credential.redirect_uri.clone(),
            is_active: credential.is_active,
            updated_by: Some(credential.updated_by),
            updated_at: Some(Utc::now()),
        };
        credentials.insert(
            key,
            (saved.clone(), credential.client_secret_sealed.clone()),
        );
        Ok(saved)
    }

    async fn list_connections(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CalendarConnection>, DomainError> {
        Ok(self
            .connections
            .read()
            .unwrap()
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|(_, (connection, _))| connection.clone())
            .collect())
    }

    async fn upsert_connection(
        &self,
        connection: &NewCalendarConnection,
    ) -> Result<CalendarConnection, DomainError> {
        let saved = CalendarConnection {
            id: Uuid::new_v4(),
            user_id: connection.user_id,
            provider: connection.provider.to_string(),
            expires_at: connection.expires_at,
            created_at: Utc::now(),
        };
        self.connections.write().unwrap().insert(
            (connection.user_id, connection.provider),
            (saved.clone(), connection.access_token_sealed.clone()),
        );
        Ok(saved)
    }

    async fn delete_connection(
        &self,
        user_id: &UserId,
        provider: OAuthProvider,
    ) -> Result<bool, DomainError> {
        Ok(self
            .connections
            .write()
            .unwrap()
            .remove(&(*user_id, provider))
            .is_some())
    }
}

// ============================================================================
// In-Memory Subscription Tier Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionTierRepository {
    tiers: Arc<RwLock<Vec<SubscriptionTier>>>,
}

impl InMemorySubscriptionTierRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(self, tier: SubscriptionTier) -> Self {
        self.tiers.write().unwrap().push(tier);
        self
    }
}

#[async_trait]
impl SubscriptionTierRepository for InMemorySubscriptionTierRepository {
    async fn list_active(&self) -> Result<Vec<SubscriptionTier>, DomainError> {
        let mut tiers: Vec<SubscriptionTier> = self
            .tiers
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        tiers.sort_by_key(|t| t.sort_order);
        Ok(tiers)
    }

    async fn find(&self, id: &Uuid) -> Result<Option<SubscriptionTier>, DomainError> {
        Ok(self
            .tiers
            .read()
            .unwrap()
            .iter()
            .find(|t| t.id == *id)
            .cloned())
    }
}

// ============================================================================
// In-Memory Invitation Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryInvitationRepository {
    invitations: Arc<RwLock<Vec<Invitation>>>,
}

impl InMemoryInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn find_pending(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Invitation>, DomainError> {
        let now = Utc::now();
        Ok(self
            .invitations
            .read()
            .unwrap()
            .iter()
            .find(|i| {
                i.organization_id == *organization_id
                    && i.email.eq_ignore_ascii_case(email)
                    && !i.accepted
                    && i.expires_at > now
            })
            .cloned())
    }

    async fn create(&self, invitation: &NewInvitation) -> Result<Invitation, DomainError> {
        let created = Invitation {
            id: Uuid::new_v4(),
            organization_id: invitation.organization_id,
            email: invitation.email.clone(),
            role: invitation.role.to_string(),
            token: invitation.token.clone(),
            invited_by: Some(invitation.invited_by),
            accepted: false,
            expires_at: invitation.expires_at,
            created_at: Utc::now(),
        };
        self.invitations.write().unwrap().push(created.clone());
        Ok(created)
    }
}

// ============================================================================
// Mock Session Verifier
// ============================================================================

#[derive(Default)]
pub struct MockSessionVerifier {
    sessions: Arc<RwLock<HashMap<String, SessionUser>>>,
}

impl MockSessionVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as a session for `user`
    pub fn with_session(self, token: &str, user: SessionUser) -> Self {
        self.sessions
            .write()
            .unwrap()
            .insert(token.to_string(), user);
        self
    }
}

#[async_trait]
impl SessionVerifier for MockSessionVerifier {
    async fn verify(&self, access_token: &str) -> Result<Option<SessionUser>, ExternalError> {
        Ok(self.sessions.read().unwrap().get(access_token).cloned())
    }
}

// ============================================================================
// Mock Object Storage
// ============================================================================

#[derive(Default)]
pub struct MockObjectStorage {
    objects: Arc<RwLock<HashMap<(String, String), Vec<u8>>>>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), ExternalError> {
        self.objects
            .write()
            .unwrap()
            .insert((bucket.to_string(), path.to_string()), bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://storage.test/object/public/{}/{}", bucket, path)
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, ExternalError> {
        Ok(format!(
            "https://storage.test/object/sign/{}/{}?token=signed-{}",
            bucket, path, expires_in
        ))
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), ExternalError> {
        self.objects
            .write()
            .unwrap()
            .remove(&(bucket.to_string(), path.to_string()));
        Ok(())
    }
}

// ============================================================================
// Mock E-mail Sender
// ============================================================================

#[derive(Default)]
pub struct MockEmailSender {
    sent: Arc<RwLock<Vec<OutboundEmail>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with an upstream error
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }

    /// Later sends succeed again
    pub fn recover(&self) {
        *self.fail.write().unwrap() = false;
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ExternalError> {
        if *self.fail.read().unwrap() {
            return Err(upstream_down());
        }
        self.sent.write().unwrap().push(email.clone());
        Ok(())
    }
}

// ============================================================================
// Mock Payment Gateway
// ============================================================================

#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    sessions: Arc<RwLock<HashMap<String, CheckoutSession>>>,
    checkouts: Arc<RwLock<Vec<CheckoutRequest>>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A retrievable checkout session for `organization_id`
    pub fn with_session(
        self,
        id: &str,
        organization_id: Option<OrganizationId>,
        paid: bool,
    ) -> Self {
        self.sessions.write().unwrap().insert(
            id.to_string(),
            CheckoutSession {
                id: id.to_string(),
                url: None,
                paid,
                customer_id: Some("cus_test".to_string()),
                organization_id,
                tier_id: None,
            },
        );
        self
    }

    pub fn last_checkout(&self) -> Option<CheckoutRequest> {
        self.checkouts.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ExternalError> {
        let mut checkouts = self.checkouts.write().unwrap();
        checkouts.push(request.clone());
        let id = format!("cs_test_{}", checkouts.len());
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.test/{}", id)),
            id,
            paid: false,
            customer_id: request.customer_id.clone(),
            organization_id: Some(request.organization_id),
            tier_id: Some(request.tier_id),
        })
    }

    async fn retrieve_checkout(&self, session_id: &str) -> Result<CheckoutSession, ExternalError> {
        self.sessions
            .read()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| ExternalError::Api {
                status: 404,
                message: format!("No such checkout session: {}", session_id),
            })
    }
}

// ============================================================================
// Mock OAuth Client
// ============================================================================

#[derive(Default, Clone)]
pub struct MockOAuthClient {
    exchanges: Arc<RwLock<Vec<(OAuthProvider, OAuthExchange)>>>,
    fail: bool,
}

impl MockOAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every exchange is rejected by the provider
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.read().unwrap().len()
    }
}

#[async_trait]
impl OAuthClient for MockOAuthClient {
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        exchange: &OAuthExchange,
    ) -> Result<OAuthTokens, ExternalError> {
        self.exchanges
            .write()
            .unwrap()
            .push((provider, exchange.clone()));
        if self.fail {
            return Err(ExternalError::Api {
                status: 400,
                message: "invalid_grant".to_string(),
            });
        }
        Ok(OAuthTokens {
            access_token: format!("access-{}", exchange.code),
            refresh_token: Some(format!("refresh-{}", exchange.code)),
            expires_in: Some(Duration::hours(1).num_seconds()),
        })
    }
}

// ============================================================================
// Mock Database Health
// ============================================================================

pub struct MockDatabaseHealth {
    healthy: bool,
}

impl MockDatabaseHealth {
    pub fn up() -> Self {
        Self { healthy: true }
    }

    pub fn down() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl DatabaseHealth for MockDatabaseHealth {
    async fn ping(&self) -> Result<(), DomainError> {
        if self.healthy {
            Ok(())
        } else {
            Err(unavailable())
        }
    }
}

// ============================================================================
// Port set
// ============================================================================

/// Empty in-memory ports with a healthy database; override fields per test
pub fn mock_ports() -> crate::Ports {
    crate::Ports {
        organizations: Arc::new(InMemoryOrganizationRepository::new()),
        profiles: Arc::new(InMemoryProfileRepository::new()),
        jobs: Arc::new(InMemoryJobRepository::new()),
        candidates: Arc::new(InMemoryCandidateRepository::new()),
        applications: Arc::new(InMemoryApplicationRepository::new()),
        interviews: Arc::new(InMemoryInterviewRepository::new()),
        scorecards: Arc::new(InMemoryScorecardRepository::new()),
        documents: Arc::new(InMemoryDocumentRepository::new()),
        integrations: Arc::new(InMemoryIntegrationRepository::new()),
        tiers: Arc::new(InMemorySubscriptionTierRepository::new()),
        invitations: Arc::new(InMemoryInvitationRepository::new()),
        sessions: Arc::new(MockSessionVerifier::new()),
        storage: Arc::new(MockObjectStorage::new()),
        email: Arc::new(MockEmailSender::new()),
        payments: Arc::new(MockPaymentGateway::new()),
        oauth: Arc::new(MockOAuthClient::new()),
        database: Arc::new(MockDatabaseHealth::up()),
    }
}
