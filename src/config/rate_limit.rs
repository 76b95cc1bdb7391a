//! Rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Rate limit configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Namespace segment of the store key (`rate:<namespace>:<sender>`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Admit requests when the store errors instead of failing them
    #[serde(default)]
    pub fail_open_on_error: bool,
}

impl RateLimitConfig {
    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.namespace.trim().is_empty() || self.namespace.contains(':') {
            return Err(ValidationError::InvalidNamespace(self.namespace.clone()));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            fail_open_on_error: false,
        }
    }
}

fn default_namespace() -> String {
    "discord".to_string()
}
