//! Sender identity used to scope rate limiting.

use std::fmt;
use std::net::IpAddr;

/// Identity used when a request carries no usable sender information.
pub const ANONYMOUS_SENDER: &str = "anonymous";

/// The derived key identifying "one caller" for rate limiting.
///
/// Derived once per request and never persisted beyond the rate-limit
/// record. Both the explicit id and the header are caller-controlled, so a
/// client can choose which bucket it lands in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenderId(String);

impl SenderId {
    /// Derives the sender identity from the available sources.
    ///
    /// Precedence: explicit body field, then header value, then peer
    /// address, then [`ANONYMOUS_SENDER`]. Text sources are trimmed and
    /// disqualified when empty after trimming.
    pub fn derive(explicit: Option<&str>, header: Option<&str>, peer: Option<IpAddr>) -> Self {
        fn usable(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(id) = usable(explicit) {
            return Self(id.to_string());
        }
        if let Some(id) = usable(header) {
            return Self(id.to_string());
        }
        match peer {
            Some(ip) => Self(ip.to_string()),
            None => Self(ANONYMOUS_SENDER.to_string()),
        }
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the shared fallback identity.
    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_SENDER
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
