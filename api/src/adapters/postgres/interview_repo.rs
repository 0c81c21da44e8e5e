//! PostgreSQL adapter for InterviewRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::query::{fetch_all, fetch_one, fetch_optional};
use crate::domain::entities::{
    ApplicationId, Interview, InterviewDraft, InterviewId, InterviewStatus, InterviewUpdate,
    OrganizationId,
};
use crate::domain::ports::InterviewRepository;
use crate::error::DomainError;

/// PostgreSQL implementation of InterviewRepository
pub struct PostgresInterviewRepository {
    db: DatabaseConnection,
}

impl PostgresInterviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InterviewRepository for PostgresInterviewRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        application_id: Option<&ApplicationId>,
    ) -> Result<Vec<Interview>, DomainError> {
        fetch_all(
            &self.db,
            r#"SELECT * FROM interviews
            WHERE organization_id = $1 AND ($2::uuid IS NULL OR application_id = $2)
            ORDER BY scheduled_at"#,
            vec![
                organization_id.0.into(),
                application_id.map(|a| a.0).into(),
            ],
        )
        .await
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &InterviewId,
    ) -> Result<Option<Interview>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM interviews WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), id.0.into()],
        )
        .await
    }

    async fn create(&self, interview: &InterviewDraft) -> Result<Interview, DomainError> {
        fetch_one(
            &self.db,
            r#"INSERT INTO interviews (
                id, organization_id, application_id, interviewer_id, scheduled_at,
                duration_minutes, location, meeting_url, provider, status, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
            RETURNING *"#,
            vec![
                InterviewId::new().0.into(),
                interview.organization_id.0.into(),
                interview.application_id.0.into(),
                interview.interviewer_id.map(|u| u.0).into(),
                interview.scheduled_at.into(),
                interview.duration_minutes.into(),
                interview.location.clone().into(),
                interview.meeting_url.clone().into(),
                interview.provider.clone().into(),
                InterviewStatus::Scheduled.to_string().into(),
                interview.notes.clone().into(),
            ],
        )
        .await
    }

    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &InterviewId,
        update: &InterviewUpdate,
    ) -> Result<Option<Interview>, DomainError> {
        fetch_optional(
            &self.db,
            r#"UPDATE interviews SET
                scheduled_at = COALESCE($3, scheduled_at),
                duration_minutes = COALESCE($4, duration_minutes),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                meeting_url = COALESCE($7, meeting_url)
            WHERE organization_id = $1 AND id = $2
            RETURNING *"#,
            vec![
                organization_id.0.into(),
                id.0.into(),
                update.scheduled_at.into(),
                update.duration_minutes.into(),
                update.status.map(|s| s.to_string()).into(),
                update.notes.clone().into(),
                update.meeting_url.clone().into(),
            ],
        )
        .await
    }
}
