//! PostgreSQL adapter for ScorecardRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::query::{execute, fetch_all, fetch_one, fetch_optional};
use crate::domain::entities::{
    InterviewId, NewScorecardTemplate, OrganizationId, Scorecard, ScorecardDraft,
    ScorecardTemplate,
};
use crate::domain::ports::ScorecardRepository;
use crate::error::DomainError;

/// PostgreSQL implementation of ScorecardRepository
pub struct PostgresScorecardRepository {
    db: DatabaseConnection,
}

impl PostgresScorecardRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScorecardRepository for PostgresScorecardRepository {
    async fn list_templates(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<ScorecardTemplate>, DomainError> {
        fetch_all(
            &self.db,
            r#"SELECT * FROM scorecard_templates
            WHERE organization_id = $1
            ORDER BY is_default DESC, name"#,
            vec![organization_id.0.into()],
        )
        .await
    }

    async fn find_template(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<Option<ScorecardTemplate>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM scorecard_templates WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), (*id).into()],
        )
        .await
    }

    async fn create_template(
        &self,
        organization_id: &OrganizationId,
        template: &NewScorecardTemplate,
    ) -> Result<ScorecardTemplate, DomainError> {
        fetch_one(
            &self.db,
            r#"INSERT INTO scorecard_templates (id, organization_id, name, criteria, is_default, created_at)
            VALUES ($1, $2, $3, $4, $5, now())
            RETURNING *"#,
            vec![
                Uuid::new_v4().into(),
                organization_id.0.into(),
                template.name.trim().to_string().into(),
                serde_json::Value::Array(template.criteria.clone()).into(),
                template.is_default.into(),
            ],
        )
        .await
    }

    async fn delete_template(
        &self,
        organization_id: &OrganizationId,
        id: &Uuid,
    ) -> Result<bool, DomainError> {
        let deleted = execute(
            &self.db,
            "DELETE FROM scorecard_templates WHERE organization_id = $1 AND id = $2",
            vec![organization_id.0.into(), (*id).into()],
        )
        .await?;

        Ok(deleted > 0)
    }

    async fn list_scorecards(
        &self,
        organization_id: &OrganizationId,
        interview_id: &InterviewId,
    ) -> Result<Vec<Scorecard>, DomainError> {
        fetch_all(
            &self.db,
            r#"SELECT * FROM scorecards
            WHERE organization_id = $1 AND interview_id = $2
            ORDER BY created_at"#,
            vec![organization_id.0.into(), interview_id.0.into()],
        )
        .await
    }

    async fn create_scorecard(
        &self,
        scorecard: &ScorecardDraft,
    ) -> Result<Scorecard, DomainError> {
        fetch_one(
            &self.db,
            r#"INSERT INTO scorecards (
                id, organization_id, interview_id, template_id, submitted_by,
                ratings, recommendation, comments, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
            RETURNING *"#,
            vec![
                Uuid::new_v4().into(),
                scorecard.organization_id.0.into(),
                scorecard.interview_id.0.into(),
                scorecard.template_id.into(),
                scorecard.submitted_by.0.into(),
                scorecard.ratings.clone().into(),
                scorecard.recommendation.clone().into(),
                scorecard.comments.clone().into(),
            ],
        )
        .await
    }
}
