use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// A single message in a persisted chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
}

impl ChatMessage {
    /// A message stamped with the current time.
    pub fn now(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: jiff::Timestamp::now(),
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// The wire form used as a plain string attribute (DynamoDB items).
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            other => Err(CoreError::InvalidRole(other.to_string())),
        }
    }
}

/// A whole session's history as one JSON document.
///
/// This is the storage shape of the single-document history backend:
/// uploaded to S3 after every append so the conversation is durable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocument {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub updated_at: jiff::Timestamp,
}

impl SessionDocument {
    /// An empty document for a session that has no stored history yet.
    pub fn empty(session_id: Uuid) -> Self {
        Self {
            session_id,
            messages: Vec::new(),
            updated_at: jiff::Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        assert_eq!(ChatRole::parse("user").unwrap(), ChatRole::User);
        assert_eq!(ChatRole::parse("assistant").unwrap(), ChatRole::Assistant);
        assert_eq!(ChatRole::User.as_str(), "user");
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(ChatRole::parse("system").is_err());
    }
}
