//! Store-backed rate limiter: one admitted message per sender per window.
//!
//! Uses a reserve-first algorithm:
//! 1. Atomically create the sender's record with the window as its expiry
//! 2. If the create succeeded, admit
//! 3. Otherwise read the record's TTL and deny with it as the retry hint
//!
//! There is no read-then-write pair, so two concurrent requests for the
//! same sender cannot both be admitted.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::SenderId;
use crate::domain::relay::RateLimitWindow;
use crate::ports::{Admission, KeyTtl, RateLimitError, RateLimitStore, RateLimiter};

/// Rate limiter that reserves windows in a [`RateLimitStore`].
#[derive(Clone)]
pub struct StoreRateLimiter {
    store: Arc<dyn RateLimitStore>,
    window: RateLimitWindow,
}

impl StoreRateLimiter {
    /// Create a limiter over `store` using `window` for keys and expiry.
    pub fn new(store: Arc<dyn RateLimitStore>, window: RateLimitWindow) -> Self {
        Self { store, window }
    }

    /// Remaining seconds for an existing record, repairing records that
    /// were left without an expiry.
    async fn remaining(&self, key: &str) -> Result<Option<u64>, RateLimitError> {
        match self.store.time_to_live(key).await? {
            KeyTtl::Expires(secs) => Ok(Some(self.window.clamp_remaining(secs))),
            KeyTtl::Persistent => {
                tracing::warn!(key, "Rate limit record has no expiry, restoring window");
                if let Err(e) = self.store.set_expiry(key, self.window.duration()).await {
                    tracing::warn!(key, error = %e, "Failed to restore rate limit expiry");
                }
                Ok(None)
            }
            // Expired between the create attempt and the TTL read
            KeyTtl::Missing => Ok(None),
        }
    }
}

#[async_trait]
impl RateLimiter for StoreRateLimiter {
    async fn check_and_reserve(&self, sender: &SenderId) -> Result<Admission, RateLimitError> {
        let key = self.window.key_for(sender);

        if self
            .store
            .create_if_absent(&key, self.window.duration())
            .await?
        {
            tracing::debug!(sender = %sender, "Rate limit window reserved");
            return Ok(Admission::Admitted);
        }

        let retry_after_secs = self.remaining(&key).await?;
        tracing::info!(
            sender = %sender,
            retry_after_secs = ?retry_after_secs,
            "Sender rate limited"
        );

        Ok(Admission::Denied { retry_after_secs })
    }}

impl std::fmt::Debug for StoreRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRateLimiter")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
