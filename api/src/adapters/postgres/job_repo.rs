//! PostgreSQL adapter for JobRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::query::{execute, fetch_all, fetch_one, fetch_optional};
use crate::domain::entities::{Job, JobId, JobStatus, JobUpdate, NewJob, OrganizationId, UserId};
use crate::domain::ports::JobRepository;
use crate::error::DomainError;

/// PostgreSQL implementation of JobRepository
pub struct PostgresJobRepository {
    db: DatabaseConnection,
}

impl PostgresJobRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>, DomainError> {
        fetch_all(
            &self.db,
            r#"SELECT * FROM jobs
            WHERE organization_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC"#,
            vec![
                organization_id.0.into(),
                status.map(|s| s.to_string()).into(),
            ],
        )
        .await
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
    ) -> Result<Option<Job>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM jobs WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), id.0.into()],
        )
        .await
    }

    async fn create(
        &self,
        organization_id: &OrganizationId,
        job: &NewJob,
        created_by: &UserId,
    ) -> Result<Job, DomainError> {
        let status = job.status.unwrap_or(JobStatus::Draft);

        fetch_one(
            &self.db,
            r#"INSERT INTO jobs (
                id, organization_id, title, department, location, employment_type,
                description, salary_min, salary_max, status, is_remote, published_at,
                created_by, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                CASE WHEN $10 = 'published' THEN now() ELSE NULL END,
                $12, now(), now()
            )
            RETURNING *"#,
            vec![
                JobId::new().0.into(),
                organization_id.0.into(),
                job.title.trim().to_string().into(),
                job.department.clone().into(),
                job.location.clone().into(),
                job.employment_type.clone().into(),
                job.description.clone().into(),
                job.salary_min.into(),
                job.salary_max.into(),
                status.to_string().into(),
                job.is_remote.into(),
                created_by.0.into(),
            ],
        )
        .await
    }

    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
        update: &JobUpdate,
    ) -> Result<Option<Job>, DomainError> {
        fetch_optional(
            &self.db,
            r#"UPDATE jobs SET
                title = COALESCE($3, title),
                department = COALESCE($4, department),
                location = COALESCE($5, location),
                employment_type = COALESCE($6, employment_type),
                description = COALESCE($7, description),
                salary_min = COALESCE($8, salary_min),
                salary_max = COALESCE($9, salary_max),
                status = COALESCE($10, status),
                is_remote = COALESCE($11, is_remote),
                published_at = CASE
                    WHEN $10 = 'published' THEN COALESCE(published_at, now())
                    ELSE published_at
                END,
                updated_at = now()
            WHERE organization_id = $1 AND id = $2
            RETURNING *"#,
            vec![
                organization_id.0.into(),
                id.0.into(),
                update.title.clone().into(),
                update.department.clone().into(),
                update.location.clone().into(),
                update.employment_type.clone().into(),
                update.description.clone().into(),
                update.salary_min.into(),
                update.salary_max.into(),
                update.status.map(|s| s.to_string()).into(),
                update.is_remote.into(),
            ],
        )
        .await
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &JobId,
    ) -> Result<bool, DomainError> {
        let deleted = execute(
            &self.db,
            "DELETE FROM jobs WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), id.0.into()],
        )
        .await?;

        Ok(deleted > 0)
    }
}
