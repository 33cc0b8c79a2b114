use axum::http::HeaderMap;

use crate::core::errors::ApiError;
use crate::core::security::{require_authorization, require_user_id};
use crate::state::AppState;
use crate::store::models::UserProfile;

/// The authenticated caller: the opaque credential to relay upstream and
/// the tenant profile resolved from the store.
pub struct Caller {
    pub authorization: String,
    pub profile: UserProfile,
}

/// Authorization presence is checked before anything else; without it no
/// store read or network call happens.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Caller, ApiError> {
    let authorization = require_authorization(headers)?;
    let user_id = require_user_id(headers)?;

    let profile = state
        .store
        .profile_for_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No profile for user".to_string()))?;

    Ok(Caller {
        authorization,
        profile,
    })
}
