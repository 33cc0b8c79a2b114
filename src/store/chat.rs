use uuid::Uuid;

use super::models::{ChatMessage, ChatSession, MessageRole};
use super::{now_rfc3339, TenantStore};
use crate::core::errors::ApiError;

impl TenantStore {
    pub async fn create_chat_session(
        &self,
        company_id: &str,
        user_id: &str,
        title: &str,
    ) -> Result<ChatSession, ApiError> {
        let id = Uuid::new_v4().to_string();
        let now = now_rfc3339();

        sqlx::query(
            "INSERT INTO chat_sessions (id, company_id, user_id, title, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(company_id)
        .bind(user_id)
        .bind(title)
        .bind(&now)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create chat session: {}", e)))?;

        Ok(ChatSession {
            id,
            company_id: company_id.to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Sessions for a company, newest first.
    pub async fn list_chat_sessions(&self, company_id: &str) -> Result<Vec<ChatSession>, ApiError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_sessions WHERE company_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(company_id)
        .fetch_all(self.pool())
        .await
        .map_err(ApiError::internal)?;

        Ok(rows.iter().map(ChatSession::from_row).collect())
    }

    pub async fn get_chat_session(
        &self,
        company_id: &str,
        session_id: &str,
    ) -> Result<Option<ChatSession>, ApiError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ? AND company_id = ?")
            .bind(session_id)
            .bind(company_id)
            .fetch_optional(self.pool())
            .await
            .map_err(ApiError::internal)?;

        Ok(row.map(|row| ChatSession::from_row(&row)))
    }

    /// Appends a message to a session. Messages are never mutated or
    /// deleted afterwards; the conversation record only grows.
    pub async fn append_chat_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ChatMessage, ApiError> {
        let now = now_rfc3339();

        let mut tx = self.pool().begin().await.map_err(ApiError::internal)?;

        sqlx::query("UPDATE chat_sessions SET updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::internal)?;

        let result = sqlx::query(
            "INSERT INTO chat_messages (session_id, content, role, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(content)
        .bind(role.as_str())
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to append message: {}", e)))?;

        tx.commit().await.map_err(ApiError::internal)?;

        Ok(ChatMessage {
            id: result.last_insert_rowid(),
            session_id: session_id.to_string(),
            content: content.to_string(),
            role,
            created_at: now,
        })
    }

    /// Messages of a session, oldest first. Rowid breaks creation-time ties
    /// so two messages written in the same instant keep insert order.
    pub async fn list_chat_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(self.pool())
        .await
        .map_err(ApiError::internal)?;

        Ok(rows.iter().map(ChatMessage::from_row).collect())
    }
}
