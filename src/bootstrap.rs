//! Service wiring - builds the relay's dependencies from configuration.
//!
//! The rate limiter variant is chosen here, once: with a Redis URL the
//! store-backed limiter, without one the pass-through limiter. The Redis
//! connection opened here lives in the returned state and is closed when
//! the state is dropped after shutdown.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::discord::{DiscordWebhookConfig, DiscordWebhookForwarder, WebhookClientError};
use crate::adapters::http::RelayAppState;
use crate::adapters::rate_limiter::{NullRateLimiter, RedisRateLimitStore, StoreRateLimiter};
use crate::application::handlers::PostMessageHandler;
use crate::config::AppConfig;
use crate::domain::relay::RateLimitWindow;
use crate::ports::{RateLimitStore, RateLimiter, StoreError};

/// Errors that can occur while wiring the service.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to connect to Redis: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to create webhook client: {0}")]
    Webhook(#[from] WebhookClientError),
}

/// Connects to the configured store and builds the application state.
///
/// # Errors
///
/// Returns `BootstrapError::Store` if a Redis URL is configured but the
/// connection cannot be established.
pub async fn build_state(config: &AppConfig) -> Result<RelayAppState, BootstrapError> {
    let store: Option<Arc<dyn RateLimitStore>> = match config.redis.url() {
        Some(url) => {
            let store = RedisRateLimitStore::connect(url).await?;
            tracing::info!("Connected to Redis, rate limiting enabled");
            Some(Arc::new(store))
        }
        None => {
            tracing::info!("No Redis configured, rate limiting disabled");
            None
        }
    };

    Ok(build_state_with_store(config, store)?)
}

/// Builds the application state around an already constructed store.
pub fn build_state_with_store(
    config: &AppConfig,
    store: Option<Arc<dyn RateLimitStore>>,
) -> Result<RelayAppState, WebhookClientError> {
    let limiter: Arc<dyn RateLimiter> = match &store {
        Some(store) => Arc::new(StoreRateLimiter::new(
            store.clone(),
            RateLimitWindow::new(config.rate_limit.namespace.clone()),
        )),
        None => Arc::new(NullRateLimiter::new()),
    };

    let forwarder = DiscordWebhookForwarder::new(
        DiscordWebhookConfig::new(config.webhook.url().map(String::from))
            .with_timeout(config.webhook.timeout()),
    )?;

    let handler = PostMessageHandler::new(limiter, Arc::new(forwarder))
        .with_fail_open_on_error(config.rate_limit.fail_open_on_error);

    Ok(RelayAppState::new(
        Arc::new(handler),
        store,
        config.server.port,
    ))
}
