//! Public career pages and candidate self-application

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::emails;
use super::validation::{is_hex_color, is_valid_email, required};
use crate::domain::entities::{
    Application, CareerPageUpdate, Job, JobId, JobStatus, NewApplication, NewCandidate,
    Organization, OrganizationId,
};
use crate::domain::ports::{
    ApplicationRepository, CandidateRepository, EmailSender, JobRepository,
    OrganizationRepository,
};
use crate::error::{AppError, DomainError};

/// Organization fields safe to show on a public page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicOrganization {
    pub id: OrganizationId,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub headline: Option<String>,
    pub intro: Option<String>,
    pub brand_color: Option<String>,
}

impl From<Organization> for PublicOrganization {
    fn from(org: Organization) -> Self {
        PublicOrganization {
            id: org.id,
            name: org.name,
            slug: org.slug,
            logo_url: org.logo_url,
            website: org.website,
            description: org.description,
            headline: org.career_page_headline,
            intro: org.career_page_intro,
            brand_color: org.brand_color,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPage {
    pub organization: PublicOrganization,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerJob {
    pub organization: PublicOrganization,
    pub job: Job,
}

/// Body of a public application
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}

pub struct CareerService {
    organizations: Arc<dyn OrganizationRepository>,
    jobs: Arc<dyn JobRepository>,
    candidates: Arc<dyn CandidateRepository>,
    applications: Arc<dyn ApplicationRepository>,
    email: Arc<dyn EmailSender>,
}

impl CareerService {
    pub fn new(
        organizations: Arc<dyn OrganizationRepository>,
        jobs: Arc<dyn JobRepository>,
        candidates: Arc<dyn CandidateRepository>,
        applications: Arc<dyn ApplicationRepository>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            organizations,
            jobs,
            candidates,
            applications,
            email,
        }
    }

    async fn published_organization(&self, slug: &str) -> Result<Organization, AppError> {
        self.organizations
            .find_by_slug(slug)
            .await?
            .filter(|org| org.career_page_enabled)
            .ok_or_else(|| AppError::NotFound("Career page not found".to_string()))
    }

    async fn published_job(&self, org: &Organization, job_id: &JobId) -> Result<Job, AppError> {
        self.jobs
            .find(&org.id, job_id)
            .await?
            .filter(Job::is_published)
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    pub async fn page(&self, slug: &str) -> Result<CareerPage, AppError> {
        let org = self.published_organization(slug).await?;
        let jobs = self.jobs.list(&org.id, Some(JobStatus::Published)).await?;
        Ok(CareerPage {
            organization: org.into(),
            jobs,
        })
    }

    pub async fn job(&self, slug: &str, job_id: &JobId) -> Result<CareerJob, AppError> {
        let org = self.published_organization(slug).await?;
        let job = self.published_job(&org, job_id).await?;
        Ok(CareerJob {
            organization: org.into(),
            job,
        })
    }

    /// Create (or reuse by e-mail) the candidate and an `applied` application.
    ///
    /// The confirmation e-mail is sent in the background; its failure is only logged.
    pub async fn apply(
        &self,
        slug: &str,
        job_id: &JobId,
        request: ApplyRequest,
    ) -> Result<Application, AppError> {
        let first_name = required(request.first_name.as_deref(), "firstName")?.to_string();
        let last_name = required(request.last_name.as_deref(), "lastName")?.to_string();
        let email = required(request.email.as_deref(), "email")?.to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }

        let org = self.published_organization(slug).await?;
        let job = self.published_job(&org, job_id).await?;

        let candidate = match self.candidates.find_by_email(&org.id, &email).await? {
            Some(existing) => existing,
            None => {
                self.candidates
                    .create(
                        &org.id,
                        &NewCandidate {
                            first_name,
                            last_name,
                            email: email.clone(),
                            phone: request.phone,
                            linkedin_url: request.linkedin_url,
                            resume_url: request.resume_url,
                            source: Some("careers".to_string()),
                        },
                    )
                    .await?
            }
        };

        if self
            .applications
            .find_by_job_and_candidate(&job.id, &candidate.id)
            .await?
            .is_some()
        {
            return Err(AppError::Domain(DomainError::Conflict(
                "You have already applied to this job".to_string(),
            )));
        }

        let application = self
            .applications
            .create(&NewApplication {
                organization_id: org.id,
                job_id: job.id,
                candidate_id: candidate.id,
                cover_letter: request.cover_letter,
            })
            .await?;

        tracing::info!(
            organization_id = %org.id,
            job_id = %job.id,
            application_id = %application.id,
            "Application received"
        );

        let confirmation =
            emails::application_received(&email, &candidate.full_name(), &job.title, &org.name);
        let sender = self.email.clone();
        let application_id = application.id;
        tokio::spawn(async move {
            if let Err(e) = sender.send(&confirmation).await {
                tracing::warn!(error = %e, application_id = %application_id, "Failed to send application confirmation");
            }
        });

        Ok(application)
    }

    pub async fn update_settings(
        &self,
        organization_id: &OrganizationId,
        update: &CareerPageUpdate,
    ) -> Result<Organization, AppError> {
        if let Some(color) = update.brand_color.as_deref() {
            if !is_hex_color(color) {
                return Err(AppError::BadRequest(
                    "brandColor must be a hex color like #1a2b3c".to_string(),
                ));
            }
        }

        self.organizations
            .update_career_page(organization_id, update)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))
    }
}
