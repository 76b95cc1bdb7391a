//! Discord relay service.
//!
//! Main entry point. Loads configuration, wires the relay and serves HTTP
//! until a shutdown signal arrives.

use discord_relay::adapters::http::start_server;
use discord_relay::bootstrap;
use discord_relay::config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        has_webhook = config.webhook.is_configured(),
        has_redis = config.redis.is_configured(),
        port = config.server.port,
        "env_summary"
    );

    let addr = config.server.socket_addr()?;
    let state = bootstrap::build_state(&config).await?;

    start_server(state, addr).await?;

    info!("Discord relay shutdown complete");
    Ok(())
}

/// Initializes tracing. `RUST_LOG` overrides the configured filter;
/// production emits JSON lines.
fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let production = config.is_production();

    tracing_subscriber::registry()
        .with(filter)
        .with(production.then(|| fmt::layer().json().with_target(true)))
        .with((!production).then(|| fmt::layer().with_target(true)))
        .init();
}
