//! Relay domain - what a post request is and what relaying it produces.

mod message;
mod result;
mod window;

pub use message::PostMessage;
pub use result::{acknowledgement, RelayResult};
pub use window::{RateLimitWindow, RATE_LIMIT_WINDOW_SECS};
