//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RateLimiter` - Check-and-reserve gate per sender
//! - `RateLimitStore` - Key-value store holding rate-limit records
//! - `MessageForwarder` - Delivery to the webhook destination

mod message_forwarder;
mod rate_limit_store;
mod rate_limiter;

pub use message_forwarder::MessageForwarder;
pub use rate_limit_store::{KeyTtl, RateLimitStore, StoreError};
pub use rate_limiter::{Admission, RateLimitError, RateLimiter};
