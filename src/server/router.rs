use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{accounts, documents, health, proxy, sessions};
use crate::state::AppState;

/// Creates the application router: health probe, the three RAG forwarding
/// endpoints, and the document/session management API, behind CORS and
/// request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = build_cors_layer(&state);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/rag/ask", post(proxy::ask))
        .route("/api/rag/build_index", post(proxy::build_index))
        .route("/api/rag/upload", post(proxy::upload))
        .route("/api/register", post(accounts::register))
        .route("/api/me", get(accounts::me))
        .route("/api/stats", get(accounts::stats))
        .route(
            "/api/documents",
            get(documents::list_documents).post(documents::upload_documents),
        )
        .route("/api/documents/build_index", post(documents::build_index))
        .route("/api/documents/:document_id", delete(documents::delete_document))
        .route(
            "/api/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/api/sessions/:session_id/messages",
            get(sessions::get_session_messages).post(sessions::send_message),
        )
        // Uploads are validated at 10 MiB per file; the body cap leaves
        // room for multipart overhead and multi-file batches.
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = resolve_allowed_origins(state);
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let allow_origin = if parsed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-user-id"),
        ])
}

fn resolve_allowed_origins(state: &AppState) -> Vec<String> {
    let configured = &state.config.server.cors_allowed_origins;
    if !configured.is_empty() {
        return configured.clone();
    }
    default_local_origins()
}

fn default_local_origins() -> Vec<String> {
    vec![
        "http://localhost".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}
