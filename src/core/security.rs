use axum::http::HeaderMap;

use crate::core::errors::ApiError;

const AUTHORIZATION_HEADER: &str = "authorization";
const USER_ID_HEADER: &str = "x-user-id";

/// Returns the opaque `Authorization` header value for relay to the RAG
/// service. The credential is never inspected here; validating it is the
/// job of the managed auth backend in front of this service.
pub fn require_authorization(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if value.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    Ok(value.to_string())
}

/// Identity of the verified caller, as asserted by the fronting auth layer
/// via the `x-user-id` header.
pub fn require_user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if value.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    Ok(value.to_string())
}
