//! Post message value object.

use crate::domain::foundation::ValidationError;

/// A validated request to relay one message.
///
/// `content` is guaranteed non-empty. Optional fields are normalized so an
/// empty display name or sender id behaves the same as an absent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMessage {
    content: String,
    username: Option<String>,
    user_id: Option<String>,
}

impl PostMessage {
    /// Creates a post message, rejecting empty content.
    pub fn new(
        content: impl Into<String>,
        username: Option<String>,
        user_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        Ok(Self {
            content,
            username: username.filter(|u| !u.is_empty()),
            user_id,
        })
    }

    /// Message text delivered to the destination.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Display-name override for the destination, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Caller-supplied sender identity, untrimmed.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
