//! Relay HTTP adapter module.
//!
//! Provides the service info, health and message-post endpoints.

pub mod dto;
pub mod handlers;
pub mod identity;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{RelayApiError, RelayAppState, SERVICE_NAME};
pub use routes::relay_routes;
