//! The one-message-per-hour window.

use std::time::Duration;

use crate::domain::foundation::SenderId;

/// Length of a sender's rate-limit window.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 3600;

/// Fixed window reserved by a sender's first admitted request.
///
/// The window runs for [`RATE_LIMIT_WINDOW_SECS`] from the first admission
/// and is never extended by later attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitWindow {
    namespace: String,
}

impl RateLimitWindow {
    /// Creates a window scoped to `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Window length.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(RATE_LIMIT_WINDOW_SECS)
    }

    /// Store key holding the sender's reservation: `rate:<namespace>:<sender>`.
    pub fn key_for(&self, sender: &SenderId) -> String {
        format!("rate:{}:{}", self.namespace, sender)
    }

    /// Clamps a store-reported TTL into the window.
    pub fn clamp_remaining(&self, secs: u64) -> u64 {
        secs.min(RATE_LIMIT_WINDOW_SECS)
    }
}

impl Default for RateLimitWindow {
    fn default() -> Self {
        Self::new("discord")
    }
}
