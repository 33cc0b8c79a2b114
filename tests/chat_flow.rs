//! Chat sessions and messages: creation, ordering, and the rule that every
//! send appends exactly one user row and one assistant row, whatever the
//! RAG service does.

mod common;

use axum::body::Body;
use serde_json::json;

use common::{auth_headers, body_json, seed_tenant, send, send_json, test_app, StubRag};

async fn create_session(app: &axum::Router, title: Option<&str>) -> String {
    let payload = match title {
        Some(title) => json!({ "title": title }),
        None => json!({}),
    };
    let response = send_json(app, "POST", "/api/sessions", &auth_headers(), payload).await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    body["session"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_then_create_session_with_default_title() {
    let stub = StubRag::spawn().await;
    let (app, _state, _dir) = test_app(&stub.url).await;

    let response = send_json(
        &app,
        "POST",
        "/api/register",
        &auth_headers(),
        json!({"company_name": "Acme"}),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["profile"]["role"], json!("admin"));
    assert_eq!(body["company"]["name"], json!("Acme"));

    let session_id = create_session(&app, None).await;
    let response = send(&app, "GET", "/api/sessions", &auth_headers(), Body::empty()).await;
    let body = body_json(response).await;
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], json!(session_id));
    assert!(sessions[0]["title"]
        .as_str()
        .unwrap()
        .starts_with("Conversation "));
}

#[tokio::test]
async fn registration_rejects_empty_company_name() {
    let stub = StubRag::spawn().await;
    let (app, _state, _dir) = test_app(&stub.url).await;

    let response = send_json(
        &app,
        "POST",
        "/api/register",
        &auth_headers(),
        json!({"company_name": "   "}),
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn send_message_appends_user_and_assistant_rows() {
    let stub = StubRag::spawn().await;
    stub.respond(200, "{\"answer\":\"Paris\"}");
    let (app, state, _dir) = test_app(&stub.url).await;
    seed_tenant(&state).await;
    let session_id = create_session(&app, Some("Geo")).await;

    let response = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", session_id),
        &auth_headers(),
        json!({"content": "Capital of France?"}),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["user_message"]["role"], json!("user"));
    assert_eq!(body["assistant_message"]["role"], json!("assistant"));
    assert_eq!(body["assistant_message"]["content"], json!("Paris"));

    let messages = state.store.list_chat_messages(&session_id).await.unwrap();
    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn missing_answer_field_uses_the_fallback_text() {
    let stub = StubRag::spawn().await;
    stub.respond(200, "{}");
    let (app, state, _dir) = test_app(&stub.url).await;
    seed_tenant(&state).await;
    let session_id = create_session(&app, Some("Empty")).await;

    let response = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", session_id),
        &auth_headers(),
        json!({"content": "hello?"}),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(
        body["assistant_message"]["content"],
        json!(ragdash_backend::manager::chat::FALLBACK_ANSWER)
    );
}

#[tokio::test]
async fn upstream_failure_still_advances_the_conversation() {
    let stub = StubRag::spawn().await;
    stub.respond(500, "model crashed");
    let (app, state, _dir) = test_app(&stub.url).await;
    seed_tenant(&state).await;
    let session_id = create_session(&app, Some("Flaky")).await;

    let response = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", session_id),
        &auth_headers(),
        json!({"content": "are you there?"}),
    )
    .await;
    // The send itself succeeds; the error becomes the assistant's turn.
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(
        body["assistant_message"]["content"],
        json!(ragdash_backend::manager::chat::ERROR_ANSWER)
    );

    let messages = state.store.list_chat_messages(&session_id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "are you there?");
}

#[tokio::test]
async fn messages_ascend_and_sessions_descend_by_creation() {
    let stub = StubRag::spawn().await;
    stub.respond(200, "{\"answer\":\"ok\"}");
    let (app, state, _dir) = test_app(&stub.url).await;
    seed_tenant(&state).await;

    let first = create_session(&app, Some("First")).await;
    let second = create_session(&app, Some("Second")).await;

    for content in ["one", "two", "three"] {
        send_json(
            &app,
            "POST",
            &format!("/api/sessions/{}/messages", first),
            &auth_headers(),
            json!({"content": content}),
        )
        .await;
    }

    let response = send(
        &app,
        "GET",
        &format!("/api/sessions/{}/messages", first),
        &auth_headers(),
        Body::empty(),
    )
    .await;
    let body = body_json(response).await;
    let contents: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["one", "ok", "two", "ok", "three", "ok"]);

    let response = send(&app, "GET", "/api/sessions", &auth_headers(), Body::empty()).await;
    let body = body_json(response).await;
    let ids: Vec<&str> = body["sessions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[tokio::test]
async fn messages_of_an_unknown_session_are_404() {
    let stub = StubRag::spawn().await;
    let (app, state, _dir) = test_app(&stub.url).await;
    seed_tenant(&state).await;

    let response = send(
        &app,
        "GET",
        "/api/sessions/no-such-session/messages",
        &auth_headers(),
        Body::empty(),
    )
    .await;
    assert_eq!(response.status(), 404);
}
