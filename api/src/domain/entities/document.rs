//! Stored document metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CandidateId, OrganizationId, UserId};
use crate::domain::transform::{FromRow, Row};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub organization_id: OrganizationId,
    pub candidate_id: Option<CandidateId>,
    pub bucket: String,
    pub path: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub uploaded_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Document {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Document {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            candidate_id: r.opt_uuid("candidate_id"),
            bucket: r.string("bucket"),
            path: r.string("path"),
            file_name: r.string("file_name"),
            content_type: r.opt_string("content_type"),
            size_bytes: r.i64("size_bytes"),
            uploaded_by: r.opt_uuid("uploaded_by"),
            created_at: r.timestamp("created_at"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub organization_id: OrganizationId,
    pub candidate_id: Option<CandidateId>,
    pub bucket: String,
    pub path: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub uploaded_by: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::to_row;
    use serde_json::json;

    #[test]
    fn document_transform_is_idempotent() {
        let once = Document::from_row(&json!({
            "id": "9c2f6a10-3b7d-4e21-8a5c-6d7e8f901201",
            "organization_id": "9c2f6a10-3b7d-4e21-8a5c-6d7e8f901202",
            "candidate_id": null,
            "bucket": "resumes",
            "path": "9c2f6a10-3b7d-4e21-8a5c-6d7e8f901202/cv.pdf",
            "file_name": "cv.pdf",
            "content_type": "application/pdf",
            "size_bytes": "48213",
            "created_at": "2026-02-14T09:30:00Z"
        }));
        assert_eq!(once.size_bytes, 48213);
        assert_eq!(once.candidate_id, None);
        assert_eq!(Document::from_row(&to_row(&once)), once);
    }
}
