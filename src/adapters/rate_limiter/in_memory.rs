//! In-memory rate limit store for testing and development.
//!
//! Keeps records in a HashMap guarded by a single mutex, which gives
//! create-if-absent the same atomicity as the Redis store. Expiry is
//! measured on the tokio clock so tests can pause and advance time.
//! Not suitable for production multi-server deployments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::ports::{KeyTtl, RateLimitStore, StoreError};

/// In-memory store for tests and single-server deployments.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    /// Record expiry per key; `None` means the record never expires.
    records: Mutex<HashMap<String, Option<Instant>>>,
    /// Simulated outage switch.
    unavailable: AtomicBool,
}

impl InMemoryRateLimitStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a record, as if its window had elapsed.
    pub async fn expire(&self, key: &str) {
        self.records.lock().await.remove(key);
    }

    /// Insert a record with no expiry.
    pub async fn insert_persistent(&self, key: &str) {
        self.records.lock().await.insert(key.to_string(), None);
    }

    /// Whether a live record exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        let records = self.records.lock().await;
        matches!(records.get(key), Some(expiry) if is_live(*expiry, Instant::now()))
    }

    /// Make every operation fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("in-memory store marked unavailable".into()));
        }
        Ok(())
    }
}

fn is_live(expiry: Option<Instant>, now: Instant) -> bool {
    expiry.map_or(true, |at| at > now)
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn create_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        self.ensure_available()?;
        let now = Instant::now();
        let mut records = self.records.lock().await;

        if let Some(expiry) = records.get(key) {
            if is_live(*expiry, now) {
                return Ok(false);
            }
        }

        records.insert(key.to_string(), Some(now + ttl));
        Ok(true)
    }

    async fn time_to_live(&self, key: &str) -> Result<KeyTtl, StoreError> {
        self.ensure_available()?;
        let now = Instant::now();
        let records = self.records.lock().await;

        Ok(match records.get(key) {
            Some(None) => KeyTtl::Persistent,
            Some(Some(at)) if *at > now => KeyTtl::Expires((*at - now).as_secs()),
            _ => KeyTtl::Missing,
        })
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        self.ensure_available()?;
        let now = Instant::now();
        let mut records = self.records.lock().await;

        if let Some(expiry) = records.get_mut(key) {
            if is_live(*expiry, now) {
                *expiry = Some(now + ttl);
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn create_if_absent_only_once() {
        let store = InMemoryRateLimitStore::new();
        assert!(store.create_if_absent("k", HOUR).await.unwrap());
        assert!(!store.create_if_absent("k", HOUR).await.unwrap());
        assert!(store.contains("k").await);
    }

    #[tokio::test(start_paused = true)]
    async fn record_expires_after_ttl() {
        let store = InMemoryRateLimitStore::new();
        store.create_if_absent("k", HOUR).await.unwrap();

        tokio::time::advance(Duration::from_secs(1800)).await;
        assert_eq!(store.time_to_live("k").await.unwrap(), KeyTtl::Expires(1800));

        tokio::time::advance(Duration::from_secs(1800)).await;
        assert_eq!(store.time_to_live("k").await.unwrap(), KeyTtl::Missing);
        assert!(store.create_if_absent("k", HOUR).await.unwrap());
    }

    #[tokio::test]
    async fn expire_removes_record() {
        let store = InMemoryRateLimitStore::new();
        store.create_if_absent("k", HOUR).await.unwrap();
        store.expire("k").await;
        assert!(!store.contains("k").await);
        assert_eq!(store.time_to_live("k").await.unwrap(), KeyTtl::Missing);
    }

    #[tokio::test]
    async fn persistent_record_reports_persistent_until_expiry_set() {
        let store = InMemoryRateLimitStore::new();
        store.insert_persistent("k").await;
        assert_eq!(store.time_to_live("k").await.unwrap(), KeyTtl::Persistent);

        store.set_expiry("k", HOUR).await.unwrap();
        assert!(matches!(
            store.time_to_live("k").await.unwrap(),
            KeyTtl::Expires(secs) if secs <= 3600
        ));
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = InMemoryRateLimitStore::new();
        store.set_unavailable(true);
        assert!(store.create_if_absent("k", HOUR).await.is_err());
        assert!(store.time_to_live("k").await.is_err());
        assert!(store.ping().await.is_err());

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn concurrent_creates_admit_exactly_one() {
        let store = std::sync::Arc::new(InMemoryRateLimitStore::new());
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create_if_absent("k", HOUR).await.unwrap()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }
}
