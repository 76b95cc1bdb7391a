//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DISCORD_RELAY` prefix and nested values use double underscores as separators.
//! The conventional flat variables `PORT`, `DISCORD_WEBHOOK_URL` and `REDIS_URL`
//! are honored as well and take precedence over their prefixed forms.
//!
//! # Example
//!
//! ```no_run
//! use discord_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod rate_limit;
mod redis;
mod server;
mod webhook;

pub use error::{ConfigError, ValidationError};
pub use rate_limit::RateLimitConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Flat environment variables and the config keys they override.
const FLAT_OVERRIDES: [(&str, &str); 3] = [
    ("PORT", "server.port"),
    ("DISCORD_WEBHOOK_URL", "webhook.url"),
    ("REDIS_URL", "redis.url"),
];

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// (if unconfigured) relay. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Discord webhook destination
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Redis configuration (rate limit counters)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Rate limiter behavior
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DISCORD_RELAY` prefix
    /// 3. Applies `PORT`, `DISCORD_WEBHOOK_URL` and `REDIS_URL` on top
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DISCORD_RELAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DISCORD_RELAY__RATE_LIMIT__NAMESPACE=ops` -> `rate_limit.namespace = "ops"`
    /// - `REDIS_URL=redis://...` -> `redis.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder().add_source(
            config::Environment::default()
                .prefix("DISCORD_RELAY")
                .separator("__"),
        );

        for (var, key) in FLAT_OVERRIDES {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.webhook.validate()?;
        self.redis.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
