//! PostgreSQL adapter for CandidateRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::query::{fetch_all, fetch_one, fetch_optional, like_pattern};
use crate::domain::entities::{Candidate, CandidateId, NewCandidate, OrganizationId};
use crate::domain::ports::CandidateRepository;
use crate::error::DomainError;

/// PostgreSQL implementation of CandidateRepository
pub struct PostgresCandidateRepository {
    db: DatabaseConnection,
}

impl PostgresCandidateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CandidateRepository for PostgresCandidateRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
        search: Option<&str>,
    ) -> Result<Vec<Candidate>, DomainError> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        fetch_all(
            &self.db,
            r#"SELECT * FROM candidates
            WHERE organization_id = $1
              AND ($2::text IS NULL
                   OR first_name ILIKE $2
                   OR last_name ILIKE $2
                   OR email ILIKE $2)
            ORDER BY created_at DESC"#,
            vec![organization_id.0.into(), pattern.into()],
        )
        .await
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &CandidateId,
    ) -> Result<Option<Candidate>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM candidates WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), id.0.into()],
        )
        .await
    }

    async fn find_by_email(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Candidate>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM candidates WHERE organization_id = $1 AND lower(email) = lower($2)",
            vec![organization_id.0.into(), email.trim().to_string().into()],
        )
        .await
    }

    async fn create(
        &self,
        organization_id: &OrganizationId,
        candidate: &NewCandidate,
    ) -> Result<Candidate, DomainError> {
        fetch_one(
            &self.db,
            r#"INSERT INTO candidates (
                id, organization_id, first_name, last_name, email, phone,
                linkedin_url, resume_url, source, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
            RETURNING *"#,
            vec![
                CandidateId::new().0.into(),
                organization_id.0.into(),
                candidate.first_name.trim().to_string().into(),
                candidate.last_name.trim().to_string().into(),
                candidate.email.trim().to_lowercase().into(),
                candidate.phone.clone().into(),
                candidate.linkedin_url.clone().into(),
                candidate.resume_url.clone().into(),
                candidate.source.clone().into(),
            ],
        )
        .await
    }
}
