//! File uploads and candidate documents
//!
//! Objects are always stored under the caller's organization id. Public
//! assets get a permanent URL, everything else a short-lived signed URL.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::access_service::Member;
use crate::domain::entities::{CandidateId, Document, NewDocument};
use crate::domain::ports::{CandidateRepository, DocumentRepository, ObjectStorage};
use crate::error::AppError;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const SIGNED_URL_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Resumes,
    Documents,
    Attachments,
    OrganizationAssets,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Resumes,
        Bucket::Documents,
        Bucket::Attachments,
        Bucket::OrganizationAssets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Resumes => "resumes",
            Bucket::Documents => "documents",
            Bucket::Attachments => "attachments",
            Bucket::OrganizationAssets => "organization-assets",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Bucket::OrganizationAssets)
    }
}

impl std::str::FromStr for Bucket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid bucket: {}", s)))
    }
}

/// Replace anything outside `[A-Za-z0-9._-]`
fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Object path under `{organization_id}/`.
///
/// A caller-supplied path keeps its directory structure; without one the
/// file name gets a random prefix.
pub fn object_path(
    organization_id: &str,
    requested: Option<&str>,
    file_name: &str,
) -> Result<String, AppError> {
    let requested = requested.map(str::trim).filter(|p| !p.is_empty());

    let relative = match requested {
        Some(path) => {
            let mut segments = Vec::new();
            for segment in path.split(['/', '\\']) {
                match segment {
                    ".." => {
                        return Err(AppError::BadRequest(
                            "Path may not contain '..'".to_string(),
                        ))
                    }
                    "" | "." => {}
                    s => segments.push(sanitize_segment(s)),
                }
            }
            // Drop a prefix the client already added
            if segments.first().map(String::as_str) == Some(organization_id) {
                segments.remove(0);
            }
            if segments.is_empty() {
                return Err(AppError::BadRequest("Invalid path".to_string()));
            }
            segments.join("/")
        }
        None => format!("{}-{}", Uuid::new_v4(), sanitize_segment(file_name)),
    };

    Ok(format!("{}/{}", organization_id, relative))
}

/// One uploaded multipart form
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub bucket: Option<String>,
    pub path: Option<String>,
    pub candidate_id: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub bucket: String,
    pub path: String,
    pub url: String,
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
}

pub struct DocumentService {
    storage: Arc<dyn ObjectStorage>,
    documents: Arc<dyn DocumentRepository>,
    candidates: Arc<dyn CandidateRepository>,
}

impl DocumentService {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        documents: Arc<dyn DocumentRepository>,
        candidates: Arc<dyn CandidateRepository>,
    ) -> Self {
        Self {
            storage,
            documents,
            candidates,
        }
    }

    pub async fn upload(&self, member: &Member, form: UploadForm) -> Result<UploadResult, AppError> {
        let bytes = form.bytes.ok_or_else(|| AppError::missing_field("file"))?;
        let bucket: Bucket = form
            .bucket
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| AppError::missing_field("bucket"))?
            .parse()?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(
                "File exceeds the 10 MB upload limit".to_string(),
            ));
        }

        let candidate_id = match form.candidate_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let id = Uuid::parse_str(raw)
                    .map(CandidateId::from)
                    .map_err(|_| AppError::BadRequest("Invalid candidateId".to_string()))?;
                if self
                    .candidates
                    .find(&member.organization_id, &id)
                    .await?
                    .is_none()
                {
                    return Err(AppError::NotFound("Candidate not found".to_string()));
                }
                Some(id)
            }
            _ => None,
        };

        let file_name = form
            .file_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = form
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let path = object_path(
            &member.organization_id.to_string(),
            form.path.as_deref(),
            &file_name,
        )?;
        let size_bytes = bytes.len() as i64;

        self.storage
            .upload(bucket.as_str(), &path, bytes, &content_type)
            .await?;

        let (url, expires_in) = if bucket.is_public() {
            (self.storage.public_url(bucket.as_str(), &path), None)
        } else {
            let url = self
                .storage
                .signed_url(bucket.as_str(), &path, SIGNED_URL_TTL_SECS)
                .await?;
            (url, Some(SIGNED_URL_TTL_SECS))
        };

        let document = match candidate_id {
            Some(candidate_id) => Some(
                self.documents
                    .create(&NewDocument {
                        organization_id: member.organization_id,
                        candidate_id: Some(candidate_id),
                        bucket: bucket.as_str().to_string(),
                        path: path.clone(),
                        file_name,
                        content_type: Some(content_type),
                        size_bytes,
                        uploaded_by: member.user_id(),
                    })
                    .await?,
            ),
            None => None,
        };

        tracing::info!(
            organization_id = %member.organization_id,
            bucket = bucket.as_str(),
            path = %path,
            size_bytes,
            "File uploaded"
        );

        Ok(UploadResult {
            success: true,
            bucket: bucket.as_str().to_string(),
            path,
            url,
            expires_in,
            document,
        })
    }

    pub async fn list(
        &self,
        member: &Member,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Document>, AppError> {
        Ok(self
            .documents
            .list_by_candidate(&member.organization_id, candidate_id)
            .await?)
    }

    /// Remove the stored object, then its row
    pub async fn delete(&self, member: &Member, id: &Uuid) -> Result<(), AppError> {
        let document = self
            .documents
            .find(&member.organization_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        self.storage
            .remove(&document.bucket, &document.path)
            .await?;
        self.documents.delete(&member.organization_id, id).await?;

        tracing::info!(
            organization_id = %member.organization_id,
            document_id = %id,
            "Document deleted"
        );
        Ok(())
    }
}
