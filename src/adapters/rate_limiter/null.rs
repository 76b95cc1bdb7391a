//! Pass-through rate limiter used when no store is configured.

use async_trait::async_trait;

use crate::domain::foundation::SenderId;
use crate::ports::{Admission, RateLimitError, RateLimiter};

/// Rate limiter that admits every request.
///
/// Selected at startup when no Redis URL is configured. This is an
/// operating mode, not a failure: nothing is logged per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRateLimiter;

impl NullRateLimiter {
    /// Create a pass-through limiter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RateLimiter for NullRateLimiter {
    async fn check_and_reserve(&self, _sender: &SenderId) -> Result<Admission, RateLimitError> {
        Ok(Admission::Admitted)
    }}
