use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::core::security::{require_authorization, require_user_id};
use crate::server::handlers::utils::authenticate;
use crate::state::AppState;
use crate::store::models::ProfileRole;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub company_name: String,
}

/// Creates the company and an admin profile for the caller. The account
/// itself (credentials, email) lives in the managed auth backend; this only
/// establishes the tenant side.
pub async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_authorization(&headers)?;
    let user_id = require_user_id(&headers)?;

    if state.store.profile_for_user(&user_id).await?.is_some() {
        return Err(ApiError::BadRequest(
            "User already belongs to a company".to_string(),
        ));
    }

    let company = state.store.create_company(&payload.company_name).await?;
    let profile = state
        .store
        .create_profile(&user_id, &company.id, ProfileRole::Admin)
        .await?;

    Ok(Json(json!({ "company": company, "profile": profile })))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let company = state
        .store
        .get_company(&caller.profile.company_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Company not found".to_string()))?;

    Ok(Json(json!({ "profile": caller.profile, "company": company })))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;
    let stats = state.store.company_stats(&caller.profile.company_id).await?;
    Ok(Json(json!({ "stats": stats })))
}
