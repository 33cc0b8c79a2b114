//! Pure forwarding endpoints. Each one checks the `Authorization` header,
//! reconstructs the upstream request, and relays the response verbatim;
//! nothing is written to the tenant store here.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::core::errors::ApiError;
use crate::core::security::require_authorization;
use crate::rag::client::{ASK_PATH, BUILD_INDEX_PATH, UPLOAD_PATH};
use crate::rag::{RagPayload, UploadFile};
use crate::state::AppState;

pub async fn ask(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let authorization = require_authorization(&headers)?;

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::internal(format!("invalid ask body: {}", e)))?;

    let result = state
        .rag
        .forward(ASK_PATH, &authorization, RagPayload::Json(payload))
        .await?;
    Ok(Json(result))
}

pub async fn build_index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let authorization = require_authorization(&headers)?;

    // An empty or malformed body is tolerated and forwarded as `{}`.
    let payload: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));

    let result = state
        .rag
        .forward(BUILD_INDEX_PATH, &authorization, RagPayload::Json(payload))
        .await?;
    Ok(Json(result))
}

pub async fn upload(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, ApiError> {
    // The authorization check must run before the multipart body is parsed,
    // so the body is extracted by hand rather than in the signature.
    let authorization = require_authorization(request.headers())?;

    let mut multipart = match Multipart::from_request(request, &()).await {
        Ok(multipart) => multipart,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    // Only the first `file` field is forwarded; every other field is dropped.
    let mut file: Option<UploadFile> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::internal(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") || file.is_some() {
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
        file = Some(UploadFile {
            name,
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    let file = file.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;

    let result = state
        .rag
        .forward(
            UPLOAD_PATH,
            &authorization,
            RagPayload::Multipart {
                file,
                company_id: None,
            },
        )
        .await?;
    Ok(Json(result).into_response())
}
