//! Discord webhook forwarder - one POST per relayed message.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::domain::relay::{acknowledgement, PostMessage, RelayResult};
use crate::ports::MessageForwarder;

/// Configuration for the Discord webhook forwarder.
#[derive(Debug, Clone)]
pub struct DiscordWebhookConfig {
    /// Webhook URL; `None` leaves the relay unconfigured.
    url: Option<SecretString>,
    /// Upper bound on one outbound call, connect through body.
    timeout: Duration,
    /// User agent sent to Discord.
    user_agent: String,
}

impl DiscordWebhookConfig {
    /// Create a configuration for `url`. Empty URLs count as unconfigured.
    pub fn new(url: Option<String>) -> Self {
        Self {
            url: url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .map(SecretString::new),
            timeout: Duration::from_secs(10),
            user_agent: format!("discord-relay/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the outbound request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors building the forwarder.
#[derive(Debug, thiserror::Error)]
pub enum WebhookClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// JSON body of Discord's execute-webhook call.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

/// Forwards messages to a Discord webhook.
///
/// Never errors: every status code is inspected explicitly and transport
/// failures are returned as [`RelayResult::TransportError`].
#[derive(Debug, Clone)]
pub struct DiscordWebhookForwarder {
    config: DiscordWebhookConfig,
    http_client: reqwest::Client,
}

impl DiscordWebhookForwarder {
    /// Create a forwarder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `WebhookClientError::Build` if the HTTP client cannot be
    /// configured.
    pub fn new(config: DiscordWebhookConfig) -> Result<Self, WebhookClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| WebhookClientError::Build(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> RelayResult {
        let message = if e.is_timeout() {
            format!("request timed out after {}s", self.config.timeout.as_secs())
        } else {
            e.without_url().to_string()
        };
        tracing::warn!(error = %message, "Discord webhook request failed");
        RelayResult::TransportError { message }
    }
}

#[async_trait]
impl MessageForwarder for DiscordWebhookForwarder {
    fn is_configured(&self) -> bool {
        self.config.url.is_some()
    }

    async fn forward(&self, message: &PostMessage) -> RelayResult {
        let Some(url) = &self.config.url else {
            return RelayResult::ConfigurationError;
        };

        let payload = WebhookPayload {
            content: message.content(),
            username: message.username(),
        };

        let start_time = std::time::Instant::now();
        let response = match self
            .http_client
            .post(url.expose_secret())
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return self.transport_error(e),
        };

        let status = response.status().as_u16();
        tracing::debug!(
            status,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Discord webhook responded"
        );

        if status == 204 {
            return RelayResult::Success(acknowledgement(204));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return self.transport_error(e),
        };

        if !(200..300).contains(&status) {
            tracing::warn!(status, "Discord webhook returned error status");
            return RelayResult::DestinationError {
                status,
                data: parse_body(&body),
            };
        }

        // Empty and `null` bodies both carry nothing to pass back
        match parse_body(&body) {
            Value::Null => RelayResult::Success(acknowledgement(status)),
            data => RelayResult::Success(data),
        }
    }
}

/// JSON when possible, raw text otherwise, `null` when empty.
fn parse_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
