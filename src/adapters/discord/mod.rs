//! Discord webhook adapter.
//!
//! Implements the `MessageForwarder` port by posting to a Discord webhook.
//!
//! # Response Handling
//!
//! Discord answers a successful execute-webhook call with `204 No Content`
//! unless `?wait=true` is used, in which case it returns the created message.
//! Both are successes. Any other status is handed back to the caller
//! verbatim as a destination error.
//!
//! # Security
//!
//! The webhook URL embeds its token. It is held in a `secrecy::SecretString`
//! and stripped from transport error messages.

mod webhook_forwarder;

pub use webhook_forwarder::{DiscordWebhookConfig, DiscordWebhookForwarder, WebhookClientError};
