//! Message forwarder port - delivery to the external destination.

use async_trait::async_trait;

use crate::domain::relay::{PostMessage, RelayResult};

/// Port for relaying a message to the destination.
///
/// Implementations never fail: every outcome, including transport errors
/// and missing configuration, is expressed as a [`RelayResult`].
#[async_trait]
pub trait MessageForwarder: Send + Sync {
    /// Whether a destination is configured.
    fn is_configured(&self) -> bool;

    /// Send one message and normalize the destination's answer.
    async fn forward(&self, message: &PostMessage) -> RelayResult;
}
