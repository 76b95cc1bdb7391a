//! Integration tests for the relay HTTP endpoints.
//!
//! These tests drive the full router with `tower::ServiceExt::oneshot`:
//! 1. Body validation and error shapes
//! 2. Rate limiting per derived sender identity
//! 3. Destination response normalization against a mock webhook

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use discord_relay::adapters::http::create_router;
use discord_relay::adapters::rate_limiter::InMemoryRateLimitStore;
use discord_relay::bootstrap::build_state_with_store;
use discord_relay::config::{AppConfig, WebhookConfig};
use discord_relay::ports::RateLimitStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn config(webhook_url: Option<String>) -> AppConfig {
    AppConfig {
        webhook: WebhookConfig {
            url: webhook_url,
            timeout_secs: 5,
        },
        ..Default::default()
    }
}

fn app(webhook_url: Option<String>, store: Option<Arc<InMemoryRateLimitStore>>) -> Router {
    let store = store.map(|s| s as Arc<dyn RateLimitStore>);
    let state = build_state_with_store(&config(webhook_url), store).unwrap();
    create_router(state)
}

async fn webhook_responding(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/webhook"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn webhook_url(server: &MockServer) -> Option<String> {
    Some(format!("{}/webhook", server.uri()))
}

fn post(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/discord/post")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

// =============================================================================
// Service info and health
// =============================================================================

#[tokio::test]
async fn root_reports_service_and_webhook_presence() {
    let (status, body) = get(&app(None, None), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "service": "discord-api", "hasWebhook": false })
    );

    let with_hook = app(Some("https://discord.com/api/webhooks/1/abc".into()), None);
    let (_, body) = get(&with_hook, "/").await;
    assert_eq!(body["hasWebhook"], true);
}

#[tokio::test]
async fn health_reports_null_redis_without_store() {
    let (status, body) = get(&app(None, None), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["port"], 3001);
    assert_eq!(body["hasWebhook"], false);
    assert!(body["uptimeSecs"].is_u64());
    assert!(body["redis"].is_null());
}

#[tokio::test]
async fn health_pings_store() {
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(None, Some(store.clone()));

    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["redis"], true);

    store.set_unavailable(true);
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redis"], false);
}

// =============================================================================
// Validation and configuration
// =============================================================================

#[tokio::test]
async fn invalid_body_is_rejected_with_details() {
    let (status, body) = send(&app(None, None), post(json!({ "message": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_body");
    assert_eq!(
        body["details"]["fieldErrors"]["message"],
        json!(["message is required"])
    );
}

#[tokio::test]
async fn malformed_json_is_invalid_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/discord/post")
        .header("content-type", "application/json")
        .body(Body::from("{oops"))
        .unwrap();

    let (status, body) = send(&app(None, None), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_body");
    assert_eq!(body["details"]["formErrors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_json_content_type_is_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(webhook_url(&server), Some(store.clone()));

    let request = Request::builder()
        .method("POST")
        .uri("/discord/post")
        .header("content-type", "text/plain")
        .body(Body::from(json!({ "message": "hi", "userId": "alice" }).to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_body");
    assert_eq!(body["details"]["fieldErrors"]["message"], json!(["Required"]));
    assert!(!store.contains("rate:discord:alice").await);
}

#[tokio::test]
async fn json_content_type_with_charset_is_accepted() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let app = app(webhook_url(&server), None);

    let request = Request::builder()
        .method("POST")
        .uri("/discord/post")
        .header("content-type", "application/json; charset=utf-8")
        .body(Body::from(json!({ "message": "hi" }).to_string()))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_webhook_is_server_error_and_keeps_window() {
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(None, Some(store.clone()));

    let (status, body) = send(&app, post(json!({ "message": "hi", "userId": "alice" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "webhook_not_configured" }));
    assert!(!store.contains("rate:discord:alice").await);
}

// =============================================================================
// Destination normalization
// =============================================================================

#[tokio::test]
async fn no_content_from_discord_is_acknowledged() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let app = app(webhook_url(&server), None);

    let (status, body) = send(&app, post(json!({ "message": "hello" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "status": 204 }));
}

#[tokio::test]
async fn discord_message_body_is_passed_through() {
    let server = webhook_responding(
        ResponseTemplate::new(200).set_body_json(json!({ "id": "42", "content": "hello" })),
    )
    .await;
    let app = app(webhook_url(&server), None);

    let (status, body) = send(&app, post(json!({ "message": "hello" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "42", "content": "hello" }));
}

#[tokio::test]
async fn null_discord_body_is_acknowledged() {
    let server = webhook_responding(
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/json")
            .set_body_string("null"),
    )
    .await;
    let app = app(webhook_url(&server), None);

    let (status, body) = send(&app, post(json!({ "message": "hello" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "status": 200 }));
}

#[tokio::test]
async fn discord_server_error_is_bad_gateway() {
    let server = webhook_responding(
        ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })),
    )
    .await;
    let app = app(webhook_url(&server), None);

    let (status, body) = send(&app, post(json!({ "message": "hello" }))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({ "error": "discord_error", "status": 500, "data": { "error": "boom" } })
    );
}

#[tokio::test]
async fn unreachable_discord_is_post_failed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let app = app(Some(format!("http://{}/webhook", addr)), None);

    let (status, body) = send(&app, post(json!({ "message": "hello" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "post_failed");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn username_override_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::body_json(json!({ "content": "hello", "username": "Ops" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = app(webhook_url(&server), None);

    let (status, _) = send(
        &app,
        post(json!({ "message": "hello", "username": "Ops", "userId": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn second_message_within_hour_is_rate_limited() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(webhook_url(&server), Some(store));

    let (first, _) = send(&app, post(json!({ "message": "one", "userId": "alice" }))).await;
    assert_eq!(first, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post(json!({ "message": "two", "userId": "alice" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_header: u64 = response.headers()["retry-after"]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_header <= 3600);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "rate_limited");
    assert_eq!(body["userId"], "alice");
    assert!(body["message"].is_string());
    let retry = body["retryAfterSeconds"].as_u64().unwrap();
    assert!(retry <= 3600);
}

#[tokio::test]
async fn sender_is_admitted_again_after_window_expires() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(webhook_url(&server), Some(store.clone()));

    send(&app, post(json!({ "message": "one", "userId": "alice" }))).await;
    store.expire("rate:discord:alice").await;

    let (status, _) = send(&app, post(json!({ "message": "two", "userId": "alice" }))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn explicit_user_id_takes_precedence_over_header() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(webhook_url(&server), Some(store.clone()));

    let mut request = post(json!({ "message": "hi", "userId": "A" }));
    request
        .headers_mut()
        .insert("x-user-id", "B".parse().unwrap());
    send(&app, request).await;

    assert!(store.contains("rate:discord:A").await);
    assert!(!store.contains("rate:discord:B").await);
}

#[tokio::test]
async fn header_identity_is_rate_limited() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(webhook_url(&server), Some(store));

    let with_header = || {
        let mut request = post(json!({ "message": "hi" }));
        request
            .headers_mut()
            .insert("x-user-id", "B".parse().unwrap());
        request
    };

    let (first, _) = send(&app, with_header()).await;
    let (second, body) = send(&app, with_header()).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["userId"], "B");
}

#[tokio::test]
async fn peer_address_then_anonymous_fallback() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(webhook_url(&server), Some(store.clone()));

    let peer: SocketAddr = "198.51.100.9:40000".parse().unwrap();
    let mut request = post(json!({ "message": "hi" }));
    request.extensions_mut().insert(ConnectInfo(peer));
    send(&app, request).await;
    assert!(store.contains("rate:discord:198.51.100.9").await);

    send(&app, post(json!({ "message": "hi" }))).await;
    assert!(store.contains("rate:discord:anonymous").await);
}

#[tokio::test]
async fn without_store_repeated_messages_are_all_relayed() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(5)
        .mount(&server)
        .await;
    let app = app(webhook_url(&server), None);

    for _ in 0..5 {
        let (status, _) = send(&app, post(json!({ "message": "hi", "userId": "alice" }))).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn store_outage_is_post_failed() {
    let server = webhook_responding(ResponseTemplate::new(204)).await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    store.set_unavailable(true);
    let app = app(webhook_url(&server), Some(store));

    let (status, body) = send(&app, post(json!({ "message": "hi" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "post_failed");
}

#[tokio::test]
async fn concurrent_posts_for_one_sender_deliver_once() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(20)))
        .expect(1)
        .mount(&server)
        .await;
    let store = Arc::new(InMemoryRateLimitStore::new());
    let app = app(webhook_url(&server), Some(store));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(&app, post(json!({ "message": "hi", "userId": "alice" }))).await.0
        }));
    }

    let mut ok = 0;
    let mut limited = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::TOO_MANY_REQUESTS => limited += 1,
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(limited, 7);
}
