//! Discord Relay - rate-limited message relay to a Discord webhook
//!
//! This crate accepts message-post requests over HTTP, admits at most one
//! message per sender per hour, and forwards admitted messages to a
//! Discord webhook, normalizing its response.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
