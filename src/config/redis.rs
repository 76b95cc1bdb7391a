//! Redis configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Redis configuration
///
/// Redis is optional. Without a URL the relay runs with rate limiting
/// disabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    #[serde(default)]
    pub url: Option<String>,
}

impl RedisConfig {
    /// The configured URL, treating an empty string as absent.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Whether a Redis store is configured
    pub fn is_configured(&self) -> bool {
        self.url().is_some()
    }

    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.url() {
            None => Ok(()),
            Some(url) if url.starts_with("redis://") || url.starts_with("rediss://") => Ok(()),
            Some(_) => Err(ValidationError::InvalidRedisUrl),
        }
    }
}
