use crate::core::errors::ApiError;
use crate::rag::RagClient;
use crate::store::models::{ChatMessage, ChatSession, MessageRole};
use crate::store::TenantStore;

/// Shown when the RAG service answered but without an `answer` field.
pub const FALLBACK_ANSWER: &str = "Sorry, I could not process your request.";

/// Shown when the ask call itself failed. The conversation record still
/// advances; the raw error is never written into the transcript.
pub const ERROR_ANSWER: &str =
    "Sorry, something went wrong. Please check that the RAG backend is running.";

/// A completed chat turn: the user's message and the assistant's reply.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChatTurn {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

#[derive(Clone)]
pub struct ChatManager {
    store: TenantStore,
    rag: RagClient,
}

impl ChatManager {
    pub fn new(store: TenantStore, rag: RagClient) -> Self {
        Self { store, rag }
    }

    pub async fn list_sessions(&self, company_id: &str) -> Result<Vec<ChatSession>, ApiError> {
        self.store.list_chat_sessions(company_id).await
    }

    pub async fn create_session(
        &self,
        company_id: &str,
        user_id: &str,
        title: Option<String>,
    ) -> Result<ChatSession, ApiError> {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(default_session_title);
        self.store
            .create_chat_session(company_id, user_id, &title)
            .await
    }

    pub async fn list_messages(
        &self,
        company_id: &str,
        session_id: &str,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        self.require_session(company_id, session_id).await?;
        self.store.list_chat_messages(session_id).await
    }

    /// Sends a question through the RAG service. The user row is written
    /// first; the assistant row is always written afterwards, carrying the
    /// answer, the fallback text when the answer field is missing, or the
    /// fixed error text when the upstream call failed. Every send appends
    /// exactly one user row and one assistant row.
    pub async fn send_message(
        &self,
        authorization: &str,
        company_id: &str,
        session_id: &str,
        question: &str,
    ) -> Result<ChatTurn, ApiError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ApiError::BadRequest("Message must not be empty".to_string()));
        }
        self.require_session(company_id, session_id).await?;

        let user_message = self
            .store
            .append_chat_message(session_id, MessageRole::User, question)
            .await?;

        let answer = match self.rag.ask(authorization, question, company_id).await {
            Ok(response) => response
                .get("answer")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| FALLBACK_ANSWER.to_string()),
            Err(err) => {
                tracing::warn!("Ask failed for session {}: {}", session_id, err);
                ERROR_ANSWER.to_string()
            }
        };

        let assistant_message = self
            .store
            .append_chat_message(session_id, MessageRole::Assistant, &answer)
            .await?;

        Ok(ChatTurn {
            user_message,
            assistant_message,
        })
    }

    async fn require_session(&self, company_id: &str, session_id: &str) -> Result<(), ApiError> {
        self.store
            .get_chat_session(company_id, session_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;
        Ok(())
    }
}

fn default_session_title() -> String {
    format!("Conversation {}", chrono::Utc::now().format("%Y-%m-%d"))
}
