//! Sender identity inputs taken from the HTTP request.
//!
//! Order of precedence, applied by `SenderId::derive`:
//! 1. `userId` body field
//! 2. `X-User-Id` header
//! 3. Peer socket address from `ConnectInfo`
//!
//! Forwarding headers such as `X-Forwarded-For` are not consulted.

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, HeaderName};

/// Header carrying a caller-chosen sender id.
pub static X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Sender id from the `X-User-Id` header, if present and valid UTF-8.
pub fn header_user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&X_USER_ID)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

/// Peer IP of the connection, if the server recorded one.
pub fn peer_ip(connect_info: Option<&ConnectInfo<SocketAddr>>) -> Option<IpAddr> {
    connect_info.map(|ci| ci.0.ip())
}
