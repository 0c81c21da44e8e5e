//! PostgreSQL adapter for DocumentRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::query::{execute, fetch_all, fetch_one, fetch_optional};
use crate::domain::entities::{CandidateId, Document, NewDocument, OrganizationId};
use crate::domain::ports::DocumentRepository;
use crate::error::DomainError;

pub struct PostgresDocumentRepository {
    db: DatabaseConnection,
}

impl PostgresDocumentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn list_by_candidate(
        &self,
        organization_id: &OrganizationId,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Document>, DomainError> {
        fetch_all(
            &self.db,
            r#"SELECT * FROM documents
            WHERE organization_id = $1 AND candidate_id = $2
            ORDER BY created_at DESC"#,
            vec![organization_id.0.into(), candidate_id.0.into()],
        )
        .await
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<Option<Document>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM documents WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), (*id).into()],
        )
        .await
    }

    async fn create(&self, document: &NewDocument) -> Result<Document, DomainError> {
        fetch_one(
            &self.db,
            r#"INSERT INTO documents (
                id, organization_id, candidate_id, bucket, path, file_name,
                content_type, size_bytes, uploaded_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
            RETURNING *"#,
            vec![
                Uuid::new_v4().into(),
                document.organization_id.0.into(),
                document.candidate_id.map(|c| c.0).into(),
                document.bucket.clone().into(),
                document.path.clone().into(),
                document.file_name.clone().into(),
                document.content_type.clone().into(),
                document.size_bytes.into(),
                document.uploaded_by.0.into(),
            ],
        )
        .await
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<bool, DomainError> {
        let deleted = execute(
            &self.db,
            "DELETE FROM documents WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), (*id).into()],
        )
        .await?;

        Ok(deleted > 0)
    }
}
