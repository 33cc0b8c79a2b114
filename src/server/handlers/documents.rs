use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::rag::UploadFile;
use crate::server::handlers::utils::authenticate;
use crate::state::AppState;

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let documents = state.documents.list(&caller.profile.company_id).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// Accepts any number of `file` fields and hands them to the manager,
/// which processes them one after another. The response carries one
/// outcome per file; a failed file never aborts the rest of the batch.
pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::internal(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::internal(format!("failed to read upload: {}", e)))?;
        files.push(UploadFile {
            name,
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest("No files provided".to_string()));
    }

    let results = state
        .documents
        .upload(
            &caller.authorization,
            &caller.profile.company_id,
            &caller.profile.user_id,
            files,
        )
        .await?;

    Ok(Json(json!({ "results": results })))
}

pub async fn build_index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let processed = state
        .documents
        .build_index(&caller.authorization, &caller.profile.company_id)
        .await?;
    Ok(Json(json!({ "success": true, "processed": processed })))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    state
        .documents
        .delete(&caller.profile.company_id, &document_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}
