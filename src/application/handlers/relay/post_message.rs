//! PostMessageHandler - Command handler for relaying one message.
//!
//! Steps, in order:
//! 1. Derive the sender identity
//! 2. Refuse if no destination is configured (the window is not consumed)
//! 3. Check and reserve the sender's rate-limit window
//! 4. Forward to the destination
//!
//! The forward runs as its own task. If the caller disconnects mid-send the
//! message is still delivered and the outcome is only logged.

use std::net::IpAddr;
use std::sync::Arc;

use crate::domain::foundation::SenderId;
use crate::domain::relay::{PostMessage, RelayResult};
use crate::ports::{Admission, MessageForwarder, RateLimiter};

/// Command to relay a message.
#[derive(Debug, Clone)]
pub struct PostMessageCommand {
    pub message: PostMessage,
    /// Sender id from the request header, if any.
    pub header_user_id: Option<String>,
    /// Peer address of the connection, if known.
    pub peer_ip: Option<IpAddr>,
}

/// Result of handling a post request.
#[derive(Debug, Clone)]
pub struct PostMessageResult {
    pub sender: SenderId,
    pub outcome: RelayResult,
}

/// Handler for relaying messages.
pub struct PostMessageHandler {
    limiter: Arc<dyn RateLimiter>,
    forwarder: Arc<dyn MessageForwarder>,
    fail_open_on_error: bool,
}

impl PostMessageHandler {
    pub fn new(limiter: Arc<dyn RateLimiter>, forwarder: Arc<dyn MessageForwarder>) -> Self {
        Self {
            limiter,
            forwarder,
            fail_open_on_error: false,
        }
    }

    /// Admit requests when the rate-limit store errors.
    pub fn with_fail_open_on_error(mut self, fail_open: bool) -> Self {
        self.fail_open_on_error = fail_open;
        self
    }

    /// Whether a destination is configured.
    pub fn has_destination(&self) -> bool {
        self.forwarder.is_configured()
    }

    pub async fn handle(&self, cmd: PostMessageCommand) -> PostMessageResult {
        // 1. Identity
        let sender = SenderId::derive(
            cmd.message.user_id(),
            cmd.header_user_id.as_deref(),
            cmd.peer_ip,
        );
        if sender.is_anonymous() {
            tracing::debug!("No sender identity available, using shared anonymous window");
        }

        // 2. Destination configured
        if !self.forwarder.is_configured() {
            tracing::error!("Discord webhook not configured");
            return PostMessageResult {
                sender,
                outcome: RelayResult::ConfigurationError,
            };
        }

        // 3. Rate limit
        match self.limiter.check_and_reserve(&sender).await {
            Ok(Admission::Admitted) => {}
            Ok(Admission::Denied { retry_after_secs }) => {
                return PostMessageResult {
                    sender,
                    outcome: RelayResult::RateLimited { retry_after_secs },
                };
            }
            Err(e) if self.fail_open_on_error => {
                tracing::warn!(sender = %sender, error = %e, "Rate limiter unavailable, admitting");
            }
            Err(e) => {
                tracing::error!(sender = %sender, error = %e, "Rate limiter unavailable");
                return PostMessageResult {
                    sender,
                    outcome: RelayResult::TransportError {
                        message: e.to_string(),
                    },
                };
            }
        }

        // 4. Forward
        let forwarder = self.forwarder.clone();
        let message = cmd.message;
        let log_sender = sender.clone();
        let task = tokio::spawn(async move {
            let outcome = forwarder.forward(&message).await;
            tracing::info!(sender = %log_sender, outcome = outcome.kind(), "Message relayed");
            outcome
        });

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Relay task failed");
                RelayResult::TransportError {
                    message: format!("relay task failed: {}", e),
                }
            }
        };

        PostMessageResult { sender, outcome }
    }
}
