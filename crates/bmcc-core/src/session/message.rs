//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message typed (or picked from the suggestions) by the applicant.
    User,
    /// Greeting, model answer, or error text shown in place of an answer.
    Assistant,
}

/// A single message in the conversation log. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    text: String,
    /// Timestamp when the message was created (ISO 8601 format).
    timestamp: String,
}

impl Message {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
