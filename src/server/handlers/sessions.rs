use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::server::handlers::utils::authenticate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let sessions = state.chat.list_sessions(&caller.profile.company_id).await?;
    Ok(Json(json!({ "sessions": sessions })))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let session = state
        .chat
        .create_session(
            &caller.profile.company_id,
            &caller.profile.user_id,
            payload.title,
        )
        .await?;
    Ok(Json(json!({ "session": session })))
}

pub async fn get_session_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let messages = state
        .chat
        .list_messages(&caller.profile.company_id, &session_id)
        .await?;
    Ok(Json(json!({ "messages": messages })))
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let turn = state
        .chat
        .send_message(
            &caller.authorization,
            &caller.profile.company_id,
            &session_id,
            &payload.content,
        )
        .await?;
    Ok(Json(json!({
        "user_message": turn.user_message,
        "assistant_message": turn.assistant_message,
    })))
}
