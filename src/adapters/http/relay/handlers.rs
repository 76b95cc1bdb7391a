//! HTTP handlers for relay endpoints.
//!
//! These handlers connect Axum routes to the post-message command handler.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Json, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use crate::adapters::validation::{validate_post_body, validate_post_value, BodyValidationErrors};
use crate::application::handlers::{PostMessageCommand, PostMessageHandler, PostMessageResult};
use crate::domain::relay::RelayResult;
use crate::ports::RateLimitStore;

use super::dto::{ErrorResponse, HealthResponse, ServiceInfoResponse};
use super::identity::{header_user_id, peer_ip};

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "discord-api";

/// Upper bound on the health check's store ping.
const STORE_PING_TIMEOUT: Duration = Duration::from_secs(2);

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Relay API error that implements IntoResponse.
#[derive(Debug)]
pub enum RelayApiError {
    InvalidBody(BodyValidationErrors),
    WebhookNotConfigured,
    RateLimited {
        retry_after_secs: Option<u64>,
        user_id: String,
    },
    Discord {
        status: u16,
        data: Value,
    },
    PostFailed(String),
}

impl IntoResponse for RelayApiError {
    fn into_response(self) -> Response {
        match self {
            RelayApiError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::invalid_body(details)),
            )
                .into_response(),
            RelayApiError::WebhookNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::webhook_not_configured()),
            )
                .into_response(),
            RelayApiError::RateLimited {
                retry_after_secs,
                user_id,
            } => {
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorResponse::rate_limited(retry_after_secs, user_id)),
                )
                    .into_response();
                if let Some(secs) = retry_after_secs {
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from(secs));
                }
                response
            }
            RelayApiError::Discord { status, data } => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::discord_error(status, data)),
            )
                .into_response(),
            RelayApiError::PostFailed(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::post_failed(message)),
            )
                .into_response(),
        }
    }
}

/// Maps a relay outcome onto the HTTP result.
fn relay_response(result: PostMessageResult) -> Result<Json<Value>, RelayApiError> {
    match result.outcome {
        RelayResult::Success(body) => Ok(Json(body)),
        RelayResult::RateLimited { retry_after_secs } => Err(RelayApiError::RateLimited {
            retry_after_secs,
            user_id: result.sender.to_string(),
        }),
        RelayResult::DestinationError { status, data } => {
            Err(RelayApiError::Discord { status, data })
        }
        RelayResult::ConfigurationError => Err(RelayApiError::WebhookNotConfigured),
        RelayResult::TransportError { message } => Err(RelayApiError::PostFailed(message)),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing relay dependencies.
#[derive(Clone)]
pub struct RelayAppState {
    pub post_handler: Arc<PostMessageHandler>,
    /// Store pinged by `/health`; `None` when rate limiting is disabled.
    pub store: Option<Arc<dyn RateLimitStore>>,
    /// Configured listen port, reported by `/health`.
    pub port: u16,
    pub started_at: Instant,
}

impl RelayAppState {
    pub fn new(
        post_handler: Arc<PostMessageHandler>,
        store: Option<Arc<dyn RateLimitStore>>,
        port: u16,
    ) -> Self {
        Self {
            post_handler,
            store,
            port,
            started_at: Instant::now(),
        }
    }

    fn has_webhook(&self) -> bool {
        self.post_handler.has_destination()
    }

    async fn store_healthy(&self) -> Option<bool> {
        let store = self.store.as_ref()?;
        let healthy = matches!(
            tokio::time::timeout(STORE_PING_TIMEOUT, store.ping()).await,
            Ok(Ok(()))
        );
        if !healthy {
            tracing::warn!("Rate limit store failed health check");
        }
        Some(healthy)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /
///
/// Service identification.
pub async fn service_info(State(state): State<RelayAppState>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        ok: true,
        service: SERVICE_NAME,
        has_webhook: state.has_webhook(),
    })
}

/// GET /health
///
/// Liveness plus configuration summary and store reachability.
pub async fn health(State(state): State<RelayAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        port: state.port,
        has_webhook: state.has_webhook(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        redis: state.store_healthy().await,
    })
}

/// POST /discord/post
///
/// Validates the body, gates the sender and relays the message.
///
/// Bodies not sent as `application/json` are not parsed and validate as an
/// empty object.
pub async fn post_message(
    State(state): State<RelayAppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, RelayApiError> {
    let message = if is_json_content_type(&headers) {
        validate_post_body(&body)
    } else {
        validate_post_value(Value::Object(Map::new()))
    }
    .map_err(RelayApiError::InvalidBody)?;

    let command = PostMessageCommand {
        message,
        header_user_id: header_user_id(&headers),
        peer_ip: peer_ip(connect_info.as_ref()),
    };

    relay_response(state.post_handler.handle(command).await)
}

/// Whether the request declares a JSON body. Parameters such as `charset`
/// are ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map_or(false, |mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type(&content_type("application/json")));
        assert!(is_json_content_type(&content_type(
            "Application/JSON; charset=utf-8"
        )));
    }

    #[test]
    fn other_content_types_are_not_json() {
        assert!(!is_json_content_type(&content_type("text/plain")));
        assert!(!is_json_content_type(&content_type(
            "application/x-www-form-urlencoded"
        )));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn rate_limited_response_sets_retry_after() {
        let response = RelayApiError::RateLimited {
            retry_after_secs: Some(120),
            user_id: "alice".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "120");
    }

    #[test]
    fn rate_limited_without_hint_has_no_retry_after() {
        let response = RelayApiError::RateLimited {
            retry_after_secs: None,
            user_id: "alice".into(),
        }
        .into_response();

        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }
}
