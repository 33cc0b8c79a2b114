use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Admin,
    User,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Admin => "admin",
            ProfileRole::User => "user",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => ProfileRole::Admin,
            _ => ProfileRole::User,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub company_id: String,
    pub role: ProfileRole,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub company_id: String,
    pub uploaded_by: String,
    pub processed: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub company_id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "assistant" => MessageRole::Assistant,
            _ => MessageRole::User,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: String,
    pub content: String,
    pub role: MessageRole,
    pub created_at: String,
}

impl Company {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        Company {
            id: row.try_get::<String, _>("id").unwrap_or_default(),
            name: row.try_get::<String, _>("name").unwrap_or_default(),
            created_at: row.try_get::<String, _>("created_at").unwrap_or_default(),
            updated_at: row.try_get::<String, _>("updated_at").unwrap_or_default(),
        }
    }
}

impl UserProfile {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        UserProfile {
            id: row.try_get::<String, _>("id").unwrap_or_default(),
            user_id: row.try_get::<String, _>("user_id").unwrap_or_default(),
            company_id: row.try_get::<String, _>("company_id").unwrap_or_default(),
            role: ProfileRole::parse(&row.try_get::<String, _>("role").unwrap_or_default()),
            created_at: row.try_get::<String, _>("created_at").unwrap_or_default(),
            updated_at: row.try_get::<String, _>("updated_at").unwrap_or_default(),
        }
    }
}

impl Document {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        Document {
            id: row.try_get::<String, _>("id").unwrap_or_default(),
            name: row.try_get::<String, _>("name").unwrap_or_default(),
            file_path: row.try_get::<String, _>("file_path").unwrap_or_default(),
            file_size: row.try_get::<i64, _>("file_size").unwrap_or_default(),
            mime_type: row.try_get::<String, _>("mime_type").unwrap_or_default(),
            company_id: row.try_get::<String, _>("company_id").unwrap_or_default(),
            uploaded_by: row.try_get::<String, _>("uploaded_by").unwrap_or_default(),
            processed: row.try_get::<bool, _>("processed").unwrap_or(false),
            created_at: row.try_get::<String, _>("created_at").unwrap_or_default(),
            updated_at: row.try_get::<String, _>("updated_at").unwrap_or_default(),
        }
    }
}

impl ChatSession {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        ChatSession {
            id: row.try_get::<String, _>("id").unwrap_or_default(),
            company_id: row.try_get::<String, _>("company_id").unwrap_or_default(),
            user_id: row.try_get::<String, _>("user_id").unwrap_or_default(),
            title: row.try_get::<String, _>("title").unwrap_or_default(),
            created_at: row.try_get::<String, _>("created_at").unwrap_or_default(),
            updated_at: row.try_get::<String, _>("updated_at").unwrap_or_default(),
        }
    }
}

impl ChatMessage {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        ChatMessage {
            id: row.try_get::<i64, _>("id").unwrap_or_default(),
            session_id: row.try_get::<String, _>("session_id").unwrap_or_default(),
            content: row.try_get::<String, _>("content").unwrap_or_default(),
            role: MessageRole::parse(&row.try_get::<String, _>("role").unwrap_or_default()),
            created_at: row.try_get::<String, _>("created_at").unwrap_or_default(),
        }
    }
}
