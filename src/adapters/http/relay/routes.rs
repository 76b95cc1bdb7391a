//! HTTP routes for relay endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, post_message, service_info, RelayAppState};

/// Creates the relay router with all routes.
pub fn relay_routes(state: RelayAppState) -> Router {
    Router::new()
        // GET /
        .route("/", get(service_info))
        // GET /health
        .route("/health", get(health))
        // POST /discord/post
        .route("/discord/post", post(post_message))
        .with_state(state)
}
