//! Command handlers.
//!
//! - `relay` - Gate and forward one post request

pub mod relay;

pub use relay::{PostMessageCommand, PostMessageHandler, PostMessageResult};
