use axum::http::StatusCode;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::errors::ApiError;

pub const ASK_PATH: &str = "/ask/";
pub const BUILD_INDEX_PATH: &str = "/build_index";
pub const UPLOAD_PATH: &str = "/upload/";

/// A file forwarded to the RAG service's upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Payload for one forwarded request.
pub enum RagPayload {
    Json(Value),
    /// Multipart upload: the single `file` field, plus the tenant id when
    /// the request comes from the document manager.
    Multipart {
        file: UploadFile,
        company_id: Option<String>,
    },
}

#[derive(Clone)]
pub struct RagClient {
    base_url: String,
    client: Client,
}

impl RagClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The one forwarding primitive every RAG operation goes through.
    ///
    /// Relays `authorization` unmodified, sends the payload to
    /// `{base_url}{path}`, and applies the proxy contract: a non-success
    /// status comes back as [`ApiError::Upstream`] carrying the upstream
    /// status and body text; any transport failure collapses into a generic
    /// internal error with the cause logged, not exposed.
    pub async fn forward(
        &self,
        path: &str,
        authorization: &str,
        payload: RagPayload,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let request = self
            .client
            .post(&url)
            .header("Authorization", authorization);

        let request = match payload {
            RagPayload::Json(body) => request.json(&body),
            RagPayload::Multipart { file, company_id } => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str(&file.mime_type)
                    .map_err(|e| {
                        tracing::error!("Invalid mime type for upload: {}", e);
                        ApiError::internal("invalid mime type")
                    })?;
                let mut form = reqwest::multipart::Form::new().part("file", part);
                if let Some(company_id) = company_id {
                    form = form.text("company_id", company_id);
                }
                request.multipart(form)
            }
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("RAG request to {} failed: {}", url, e);
            ApiError::internal("RAG service unreachable")
        })?;

        let status =
            StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::upstream(status, body));
        }

        response.json::<Value>().await.map_err(|e| {
            tracing::error!("RAG response from {} was not valid JSON: {}", url, e);
            ApiError::internal("invalid RAG response")
        })
    }

    pub async fn ask(
        &self,
        authorization: &str,
        question: &str,
        company_id: &str,
    ) -> Result<Value, ApiError> {
        self.forward(
            ASK_PATH,
            authorization,
            RagPayload::Json(json!({
                "question": question,
                "company_id": company_id,
            })),
        )
        .await
    }

    pub async fn build_index(
        &self,
        authorization: &str,
        company_id: &str,
    ) -> Result<Value, ApiError> {
        self.forward(
            BUILD_INDEX_PATH,
            authorization,
            RagPayload::Json(json!({ "company_id": company_id })),
        )
        .await
    }

    pub async fn upload(
        &self,
        authorization: &str,
        file: UploadFile,
        company_id: &str,
    ) -> Result<Value, ApiError> {
        self.forward(
            UPLOAD_PATH,
            authorization,
            RagPayload::Multipart {
                file,
                company_id: Some(company_id.to_string()),
            },
        )
        .await
    }
}
