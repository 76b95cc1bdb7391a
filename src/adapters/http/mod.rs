//! HTTP adapters - REST API implementations.

pub mod relay;
pub mod server;

// Re-export key types for convenience
pub use relay::{relay_routes, RelayAppState};
pub use server::{create_router, start_server};
