//! PostgreSQL adapter for ApplicationRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::query::{fetch_all, fetch_one, fetch_optional};
use crate::domain::entities::{
    Application, ApplicationId, ApplicationStage, CandidateId, JobId, NewApplication,
    OrganizationId,
};
use crate::domain::ports::ApplicationRepository;
use crate::error::DomainError;

/// PostgreSQL implementation of ApplicationRepository
pub struct PostgresApplicationRepository {
    db: DatabaseConnection,
}

impl PostgresApplicationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        job_id: Option<&JobId>,
        stage: Option<ApplicationStage>,
    ) -> Result<Vec<Application>, DomainError> {
        fetch_all(
            &self.db,
            r#"SELECT * FROM applications
            WHERE organization_id = $1
              AND ($2::uuid IS NULL OR job_id = $2)
              AND ($3::text IS NULL OR stage = $3)
            ORDER BY created_at DESC"#,
            vec![
                organization_id.0.into(),
                job_id.map(|j| j.0).into(),
                stage.map(|s| s.to_string()).into(),
            ],
        )
        .await
    }

    async fn list_by_candidate(
        &self,
        organization_id: &OrganizationId,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, DomainError> {
        fetch_all(
            &self.db,
            r#"SELECT * FROM applications
            WHERE organization_id = $1 AND candidate_id = $2
            ORDER BY created_at DESC"#,
            vec![organization_id.0.into(), candidate_id.0.into()],
        )
        .await
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM applications WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), id.0.into()],
        )
        .await
    }

    async fn find_by_job_and_candidate(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Result<Option<Application>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM applications WHERE job_id = $1 AND candidate_id = $2",
            vec![job_id.0.into(), candidate_id.0.into()],
        )
        .await
    }

    async fn create(&self, application: &NewApplication) -> Result<Application, DomainError> {
        fetch_one(
            &self.db,
            r#"INSERT INTO applications (
                id, organization_id, job_id, candidate_id, stage, cover_letter,
                rejected, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, false, now(), now())
            RETURNING *"#,
            vec![
                ApplicationId::new().0.into(),
                application.organization_id.0.into(),
                application.job_id.0.into(),
                application.candidate_id.0.into(),
                ApplicationStage::Applied.to_string().into(),
                application.cover_letter.clone().into(),
            ],
        )
        .await
    }

    async fn update_stage(
        &self,
        organization_id: &OrganizationId,
        id: &ApplicationId,
        stage: ApplicationStage,
    ) -> Result<Option<Application>, DomainError> {
        fetch_optional(
            &self.db,
            r#"UPDATE applications SET
                stage = $3,
                rejected = ($3 = 'rejected'),
                updated_at = now()
            WHERE organization_id = $1 AND id = $2
            RETURNING *"#,
            vec![
                organization_id.0.into(),
                id.0.into(),
                stage.to_string().into(),
            ],
        )
        .await
    }
}
