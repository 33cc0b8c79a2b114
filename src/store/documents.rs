use uuid::Uuid;

use super::models::Document;
use super::{now_rfc3339, TenantStore};
use crate::core::errors::ApiError;

/// Fields for a new document row. `processed` always starts false; it only
/// flips through [`TenantStore::mark_company_documents_processed`].
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub company_id: String,
    pub uploaded_by: String,
}

impl TenantStore {
    pub async fn insert_document(&self, new: NewDocument) -> Result<Document, ApiError> {
        if new.file_size < 0 {
            return Err(ApiError::BadRequest(
                "File size must not be negative".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        let now = now_rfc3339();

        sqlx::query(
            "INSERT INTO documents \
             (id, name, file_path, file_size, mime_type, company_id, uploaded_by, processed, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?)",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.file_path)
        .bind(new.file_size)
        .bind(&new.mime_type)
        .bind(&new.company_id)
        .bind(&new.uploaded_by)
        .bind(&now)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to insert document: {}", e)))?;

        Ok(Document {
            id,
            name: new.name,
            file_path: new.file_path,
            file_size: new.file_size,
            mime_type: new.mime_type,
            company_id: new.company_id,
            uploaded_by: new.uploaded_by,
            processed: false,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn list_documents(&self, company_id: &str) -> Result<Vec<Document>, ApiError> {
        let rows = sqlx::query(
            "SELECT * FROM documents WHERE company_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(company_id)
        .fetch_all(self.pool())
        .await
        .map_err(ApiError::internal)?;

        Ok(rows.iter().map(Document::from_row).collect())
    }

    /// Flips processed on every document of the company in one bulk update.
    /// The RAG service does not report which files it indexed, so success is
    /// propagated uniformly to the whole tenant. Returns the affected count.
    pub async fn mark_company_documents_processed(
        &self,
        company_id: &str,
    ) -> Result<u64, ApiError> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "UPDATE documents SET processed = 1, updated_at = ? WHERE company_id = ?",
        )
        .bind(&now)
        .bind(company_id)
        .execute(self.pool())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to mark documents processed: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// Removes the metadata row only. The stored file and its index entries
    /// live in the RAG service and are not cleaned up here.
    pub async fn delete_document(
        &self,
        company_id: &str,
        document_id: &str,
    ) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ? AND company_id = ?")
            .bind(document_id)
            .bind(company_id)
            .execute(self.pool())
            .await
            .map_err(ApiError::internal)?;

        Ok(result.rows_affected() > 0)
    }
}
