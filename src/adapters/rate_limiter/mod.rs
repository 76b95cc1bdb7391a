//! Rate limiter adapters.
//!
//! Implementations of the RateLimiter and RateLimitStore ports.
//!
//! ## Available Adapters
//!
//! - `NullRateLimiter` - Admits everything; used when no store is configured
//! - `StoreRateLimiter` - One message per sender per window, backed by a store
//! - `RedisRateLimitStore` - Redis-backed store for production multi-server
//! - `InMemoryRateLimitStore` - In-memory store for testing and single-server
//!
//! ## Usage
//!
//! ```ignore
//! use discord_relay::adapters::rate_limiter::{
//!     InMemoryRateLimitStore, NullRateLimiter, StoreRateLimiter,
//! };
//! use discord_relay::domain::relay::RateLimitWindow;
//!
//! // Without a store
//! let limiter = NullRateLimiter::new();
//!
//! // With a store
//! let store = Arc::new(InMemoryRateLimitStore::new());
//! let limiter = StoreRateLimiter::new(store, RateLimitWindow::new("discord"));
//! ```

mod in_memory;
mod null;
mod redis;
mod store_backed;

pub use in_memory::InMemoryRateLimitStore;
pub use null::NullRateLimiter;
pub use redis::RedisRateLimitStore;
pub use store_backed::StoreRateLimiter;
