//! Domain layer containing relay types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (sender identity, errors)
//! - `relay` - Post requests, rate-limit window and relay outcomes

pub mod foundation;
pub mod relay;
