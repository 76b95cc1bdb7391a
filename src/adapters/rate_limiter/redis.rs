//! Redis-backed rate limit store for production deployments.
//!
//! Reservations use a single `SET key 1 NX EX <window>` round-trip, so the
//! record is created and given its expiry atomically. Suitable for
//! multi-server deployments.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{KeyTtl, RateLimitStore, StoreError};

/// Redis-backed store for rate limit records.
///
/// Holds a multiplexed connection opened once at startup and shared by
/// all requests; clones are cheap handles onto the same connection.
#[derive(Clone)]
pub struct RedisRateLimitStore {
    conn: MultiplexedConnection,
}

impl RedisRateLimitStore {
    /// Wrap an already established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open a multiplexed connection to `url`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(store_error)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(store_error)?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn create_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();

        // Nil reply means the key already existed
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs())
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;

        Ok(reply.is_some())
    }

    async fn time_to_live(&self, key: &str) -> Result<KeyTtl, StoreError> {
        let mut conn = self.conn.clone();

        let reply: i64 = conn.ttl(key).await.map_err(store_error)?;

        Ok(KeyTtl::from_redis_reply(reply))
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        conn.expire::<_, ()>(key, ttl.as_secs() as i64)
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        let _: () = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;

        Ok(())
    }
}

impl std::fmt::Debug for RedisRateLimitStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRateLimitStore").finish_non_exhaustive()
    }
}

fn store_error(e: redis::RedisError) -> StoreError {
    if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() || e.is_timeout()
    {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Command(e.to_string())
    }
}
