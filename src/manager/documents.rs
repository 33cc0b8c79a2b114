use serde::Serialize;

use crate::core::errors::ApiError;
use crate::rag::{RagClient, UploadFile};
use crate::store::documents::NewDocument;
use crate::store::models::Document;
use crate::store::TenantStore;

pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Result of one file in an upload batch. A batch never aborts early; each
/// file gets its own outcome.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    fn ok(document: Document) -> Self {
        UploadOutcome {
            name: document.name.clone(),
            success: true,
            document: Some(document),
            error: None,
        }
    }

    fn failed(name: &str, error: String) -> Self {
        UploadOutcome {
            name: name.to_string(),
            success: false,
            document: None,
            error: Some(error),
        }
    }
}

/// Rejects files the dashboard would never accept, before any network call.
pub fn validate_upload(file: &UploadFile) -> Result<(), String> {
    if file.mime_type != PDF_MIME && file.mime_type != DOCX_MIME {
        return Err(format!("Unsupported file type: {}", file.mime_type));
    }
    if file.bytes.len() > MAX_FILE_SIZE {
        return Err("File exceeds the 10 MB limit".to_string());
    }
    Ok(())
}

#[derive(Clone)]
pub struct DocumentManager {
    store: TenantStore,
    rag: RagClient,
}

impl DocumentManager {
    pub fn new(store: TenantStore, rag: RagClient) -> Self {
        Self { store, rag }
    }

    pub async fn list(&self, company_id: &str) -> Result<Vec<Document>, ApiError> {
        self.store.list_documents(company_id).await
    }

    /// Uploads a batch of files, strictly one after another. Per file:
    /// validate, forward to the RAG service, then insert the metadata row
    /// with processed=false and the file_path the service returned. An
    /// insert failure after a successful upload leaves an orphan file
    /// upstream; it is logged and reported, never rolled back.
    pub async fn upload(
        &self,
        authorization: &str,
        company_id: &str,
        uploaded_by: &str,
        files: Vec<UploadFile>,
    ) -> Result<Vec<UploadOutcome>, ApiError> {
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            outcomes.push(
                self.upload_one(authorization, company_id, uploaded_by, file)
                    .await,
            );
        }

        Ok(outcomes)
    }

    async fn upload_one(
        &self,
        authorization: &str,
        company_id: &str,
        uploaded_by: &str,
        file: UploadFile,
    ) -> UploadOutcome {
        if let Err(reason) = validate_upload(&file) {
            return UploadOutcome::failed(&file.name, reason);
        }

        let name = file.name.clone();
        let mime_type = file.mime_type.clone();
        let file_size = file.bytes.len() as i64;

        let response = match self.rag.upload(authorization, file, company_id).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Upload of {} failed: {}", name, err);
                return UploadOutcome::failed(&name, "Upload failed".to_string());
            }
        };

        if !response
            .get("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            return UploadOutcome::failed(&name, "RAG service rejected the file".to_string());
        }

        let file_path = response
            .get("file_path")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        match self
            .store
            .insert_document(NewDocument {
                name: name.clone(),
                file_path,
                file_size,
                mime_type,
                company_id: company_id.to_string(),
                uploaded_by: uploaded_by.to_string(),
            })
            .await
        {
            Ok(document) => UploadOutcome::ok(document),
            Err(err) => {
                // The file now exists upstream with no metadata row.
                tracing::error!("Orphaned upload {}: metadata insert failed: {}", name, err);
                UploadOutcome::failed(&name, "Failed to record document".to_string())
            }
        }
    }

    /// Triggers an index build for the tenant, then bulk-marks every
    /// document row processed. The RAG service does not say which files it
    /// indexed, so success applies uniformly to the whole company.
    pub async fn build_index(
        &self,
        authorization: &str,
        company_id: &str,
    ) -> Result<u64, ApiError> {
        let response = self.rag.build_index(authorization, company_id).await?;

        let success = response
            .get("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !success {
            return Err(ApiError::internal("RAG service reported build failure"));
        }

        self.store.mark_company_documents_processed(company_id).await
    }

    pub async fn delete(&self, company_id: &str, document_id: &str) -> Result<(), ApiError> {
        let deleted = self.store.delete_document(company_id, document_id).await?;
        if !deleted {
            return Err(ApiError::NotFound("Document not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, size: usize) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            mime_type: mime.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn accepts_pdf_and_docx_within_limit() {
        assert!(validate_upload(&file("report.pdf", PDF_MIME, 2 * 1024 * 1024)).is_ok());
        assert!(validate_upload(&file("notes.docx", DOCX_MIME, 1024)).is_ok());
    }

    #[test]
    fn rejects_unsupported_types() {
        let err = validate_upload(&file("image.png", "image/png", 10)).unwrap_err();
        assert!(err.contains("Unsupported file type"));
    }

    #[test]
    fn rejects_files_over_ten_megabytes() {
        assert!(validate_upload(&file("big.pdf", PDF_MIME, MAX_FILE_SIZE)).is_ok());
        let err = validate_upload(&file("big.pdf", PDF_MIME, MAX_FILE_SIZE + 1)).unwrap_err();
        assert!(err.contains("10 MB"));
    }
}
