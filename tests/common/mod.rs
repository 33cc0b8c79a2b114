#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt as _;

use ragdash_backend::core::config::{AppConfig, AppPaths};
use ragdash_backend::server::router::router;
use ragdash_backend::state::AppState;
use ragdash_backend::store::models::ProfileRole;
use ragdash_backend::store::TenantStore;

pub const AUTH: &str = "Bearer test-token";
pub const USER_ID: &str = "user-1";

/// In-process stand-in for the RAG service. Serves one configured response
/// on every path and records what it saw.
#[derive(Clone)]
pub struct StubRag {
    pub url: String,
    inner: Arc<StubInner>,
}

struct StubInner {
    hits: AtomicUsize,
    response: Mutex<(u16, String)>,
    last_body: Mutex<Option<Value>>,
    last_fields: Mutex<Vec<String>>,
    last_authorization: Mutex<Option<String>>,
}

impl StubRag {
    pub async fn spawn() -> Self {
        let inner = Arc::new(StubInner {
            hits: AtomicUsize::new(0),
            response: Mutex::new((200, "{\"success\":true}".to_string())),
            last_body: Mutex::new(None),
            last_fields: Mutex::new(Vec::new()),
            last_authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/ask/", post(stub_json))
            .route("/build_index", post(stub_json))
            .route("/upload/", post(stub_upload))
            .layer(axum::extract::DefaultBodyLimit::disable())
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubRag {
            url: format!("http://{}", addr),
            inner,
        }
    }

    pub fn respond(&self, status: u16, body: &str) {
        *self.inner.response.lock().unwrap() = (status, body.to_string());
    }

    pub fn hits(&self) -> usize {
        self.inner.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.inner.last_body.lock().unwrap().clone()
    }

    pub fn last_fields(&self) -> Vec<String> {
        self.inner.last_fields.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.inner.last_authorization.lock().unwrap().clone()
    }
}

fn record_authorization(inner: &StubInner, headers: &axum::http::HeaderMap) {
    *inner.last_authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
}

async fn stub_json(
    State(inner): State<Arc<StubInner>>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    inner.hits.fetch_add(1, Ordering::SeqCst);
    record_authorization(&inner, &headers);
    *inner.last_body.lock().unwrap() = serde_json::from_slice(&body).ok();
    stub_response(&inner)
}

async fn stub_upload(
    State(inner): State<Arc<StubInner>>,
    headers: axum::http::HeaderMap,
    mut multipart: Multipart,
) -> Response {
    inner.hits.fetch_add(1, Ordering::SeqCst);
    record_authorization(&inner, &headers);
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        fields.push(field.name().unwrap_or("").to_string());
        let _ = field.bytes().await;
    }
    *inner.last_fields.lock().unwrap() = fields;
    stub_response(&inner)
}

fn stub_response(inner: &StubInner) -> Response {
    let (status, body) = inner.response.lock().unwrap().clone();
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Router backed by a temp-dir store, with the RAG client pointed at `rag_url`.
pub async fn test_app(rag_url: &str) -> (Router, Arc<AppState>, TempDir) {
    let dir = TempDir::new().unwrap();
    let paths = Arc::new(AppPaths {
        user_data_dir: dir.path().to_path_buf(),
        log_dir: dir.path().join("logs"),
        db_path: dir.path().join("ragdash.db"),
    });

    let mut config = AppConfig::default();
    config.rag.base_url = rag_url.to_string();

    let store = TenantStore::new(paths.db_path.clone()).await.unwrap();
    let state = AppState::assemble(paths, config, store);
    (router(state.clone()), state, dir)
}

/// Seeds a company and an admin profile for [`USER_ID`], returning the
/// company id.
pub async fn seed_tenant(state: &AppState) -> String {
    let company = state.store.create_company("Acme").await.unwrap();
    state
        .store
        .create_profile(USER_ID, &company.id, ProfileRole::Admin)
        .await
        .unwrap();
    company.id
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Body,
) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Value,
) -> Response {
    let mut all_headers = vec![("content-type", "application/json")];
    all_headers.extend_from_slice(headers);
    send(app, method, uri, &all_headers, Body::from(body.to_string())).await
}

pub fn auth_headers() -> Vec<(&'static str, &'static str)> {
    vec![("authorization", AUTH), ("x-user-id", USER_ID)]
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub const BOUNDARY: &str = "ragdashtestboundary";

/// Builds a raw multipart body with the given `file` parts and extra text
/// fields.
pub fn multipart_body(files: &[(&str, &str, &[u8])], extra: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, mime, bytes) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in extra {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
