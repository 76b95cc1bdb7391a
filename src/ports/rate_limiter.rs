//! Rate limiting port for the one-message-per-window gate.
//!
//! This port defines the check-and-reserve operation. Implementations either
//! admit everything (no store configured) or reserve a window in a shared
//! store so concurrent requests for the same sender cannot both pass.

use async_trait::async_trait;

use crate::domain::foundation::SenderId;

use super::rate_limit_store::StoreError;

/// Port for rate limiting operations.
///
/// Implementations should be thread-safe and support concurrent access.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Admit the sender and reserve its window, or deny it.
    ///
    /// Admission and reservation happen in one atomic step.
    async fn check_and_reserve(&self, sender: &SenderId) -> Result<Admission, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Request may proceed; the window is now reserved.
    Admitted,
    /// Request is denied. `retry_after_secs` is `None` when the remaining
    /// time is unknown.
    Denied { retry_after_secs: Option<u64> },
}

impl Admission {
    /// Returns true if the request was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(#[from] StoreError),
}
