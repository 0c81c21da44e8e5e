//! Upload and document handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{UploadForm, UploadResult};
use crate::domain::entities::{Action, CandidateId, Document, SessionUser};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    pub candidate_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}

fn multipart_error(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", e))
}

/// Collect the known form fields; unknown fields are skipped
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name().unwrap_or_default() {
            "file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.content_type = field.content_type().map(str::to_string);
                form.bytes = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            "bucket" => form.bucket = Some(field.text().await.map_err(multipart_error)?),
            "path" => form.path = Some(field.text().await.map_err(multipart_error)?),
            "candidateId" => {
                form.candidate_id = Some(field.text().await.map_err(multipart_error)?)
            }
            _ => {}
        }
    }
    Ok(form)
}

/// POST /api/upload
///
/// Multipart fields: `file`, `bucket`, optional `path` and `candidateId`.
pub async fn upload(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    let member = state.access.require(&user, Action::UploadDocuments).await?;
    let form = read_form(multipart).await?;
    Ok(Json(state.documents.upload(&member, form).await?))
}

/// GET /api/documents?candidate_id=
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let member = state.access.require(&user, Action::ViewPipeline).await?;
    let candidate_id = query
        .candidate_id
        .map(CandidateId)
        .ok_or_else(|| AppError::missing_field("candidate_id"))?;
    Ok(Json(state.documents.list(&member, &candidate_id).await?))
}

/// DELETE /api/documents/:id
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let member = state.access.require(&user, Action::UploadDocuments).await?;
    state.documents.delete(&member, &id).await?;
    Ok(Json(DeletedResponse { success: true }))
}
