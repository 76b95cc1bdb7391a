//! Foundation module - Shared domain primitives.
//!
//! Contains the sender identity value object and the validation error
//! type used across the relay domain.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::{SenderId, ANONYMOUS_SENDER};
