//! HTTP DTOs for relay endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::adapters::validation::BodyValidationErrors;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `GET /` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoResponse {
    pub ok: bool,
    pub service: &'static str,
    pub has_webhook: bool,
}

/// `GET /health` response.
///
/// `redis` is `null` when no store is configured.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub port: u16,
    pub has_webhook: bool,
    pub uptime_secs: u64,
    pub redis: Option<bool>,
}

/// Error response with a stable `error` code.
///
/// Only the fields relevant to each code are serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BodyValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorResponse {
    fn code(error: &'static str) -> Self {
        Self {
            error,
            message: None,
            details: None,
            retry_after_seconds: None,
            user_id: None,
            status: None,
            data: None,
        }
    }

    pub fn invalid_body(details: BodyValidationErrors) -> Self {
        Self {
            details: Some(details),
            ..Self::code("invalid_body")
        }
    }

    pub fn webhook_not_configured() -> Self {
        Self::code("webhook_not_configured")
    }

    pub fn rate_limited(retry_after_seconds: Option<u64>, user_id: impl Into<String>) -> Self {
        Self {
            message: Some("Rate limit exceeded: one message per hour per user".to_string()),
            retry_after_seconds,
            user_id: Some(user_id.into()),
            ..Self::code("rate_limited")
        }
    }

    pub fn discord_error(status: u16, data: Value) -> Self {
        Self {
            status: Some(status),
            data: Some(data),
            ..Self::code("discord_error")
        }
    }

    pub fn post_failed(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::code("post_failed")
        }
    }
}
