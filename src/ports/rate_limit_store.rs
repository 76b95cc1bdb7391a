//! Key-value store port backing the rate limiter.
//!
//! The store owns all cross-request state. Its create-if-absent operation
//! is the only synchronization point between concurrent requests.

use std::time::Duration;

use async_trait::async_trait;

/// Port for the store holding rate-limit records.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Create `key` with the given time-to-live if it does not exist.
    ///
    /// Must be a single atomic operation that also applies the expiry.
    /// Returns `true` if the key was created.
    async fn create_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, StoreError>;

    /// Remaining time-to-live of `key`.
    async fn time_to_live(&self, key: &str) -> Result<KeyTtl, StoreError>;

    /// Set the expiry of an existing key.
    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Liveness check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Time-to-live as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// Key expires after this many seconds.
    Expires(u64),
    /// Key exists with no expiry.
    Persistent,
    /// Key does not exist.
    Missing,
}

impl KeyTtl {
    /// Interprets a Redis `TTL` reply (-2 missing, -1 no expiry).
    pub fn from_redis_reply(reply: i64) -> Self {
        match reply {
            -2 => KeyTtl::Missing,
            r if r < 0 => KeyTtl::Persistent,
            r => KeyTtl::Expires(r as u64),
        }
    }
}

/// Errors raised by a rate-limit store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Could not reach the store.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// Store answered with an error or an unexpected reply.
    #[error("store command failed: {0}")]
    Command(String),
}
