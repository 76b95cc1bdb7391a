//! Relay outcomes.

use serde_json::{json, Value};

/// Synthetic acknowledgement used when the destination sends no body.
pub fn acknowledgement(status: u16) -> Value {
    json!({ "ok": true, "status": status })
}

/// Outcome of relaying one post request.
///
/// Every request ends in exactly one variant; the HTTP adapter maps each to
/// a status code and a stable `error` code.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayResult {
    /// Destination accepted the message. Carries its body or an acknowledgement.
    Success(Value),

    /// Sender already used its window. `None` when the store could not say
    /// how long remains.
    RateLimited { retry_after_secs: Option<u64> },

    /// Destination answered with a non-success status.
    DestinationError { status: u16, data: Value },

    /// No destination configured.
    ConfigurationError,

    /// Destination could not be reached, or the gate itself failed.
    TransportError { message: String },
}

impl RelayResult {
    /// Returns true if the message was delivered.
    pub fn is_success(&self) -> bool {
        matches!(self, RelayResult::Success(_))
    }

    /// Short label for logs and metrics fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayResult::Success(_) => "success",
            RelayResult::RateLimited { .. } => "rate_limited",
            RelayResult::DestinationError { .. } => "destination_error",
            RelayResult::ConfigurationError => "configuration_error",
            RelayResult::TransportError { .. } => "transport_error",
        }
    }
}
