//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `discord` - Discord webhook forwarder
//! - `http` - Axum routes, handlers and server
//! - `rate_limiter` - Rate limiters and their stores (Redis, in-memory)
//! - `validation` - Inbound request body validation

pub mod discord;
pub mod http;
pub mod rate_limiter;
pub mod validation;
