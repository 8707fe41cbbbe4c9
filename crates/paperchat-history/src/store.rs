use async_trait::async_trait;
use uuid::Uuid;

use paperchat_core::models::chat::ChatMessage;

use crate::error::HistoryError;

/// Per-session chat history.
///
/// Messages are append-only within a session; the only mutation is bulk
/// deletion. `read` returns the most recent `limit` messages in
/// timestamp-ascending order.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, session_id: Uuid, message: &ChatMessage) -> Result<(), HistoryError>;

    async fn read(&self, session_id: Uuid, limit: usize) -> Result<Vec<ChatMessage>, HistoryError>;

    async fn clear(&self, session_id: Uuid) -> Result<(), HistoryError>;
}

/// The most recent `limit` messages of `messages`, in timestamp-ascending
/// order. Shared read policy of both backends.
pub fn tail_in_order(mut messages: Vec<ChatMessage>, limit: usize) -> Vec<ChatMessage> {
    messages.sort_by_key(|m| m.timestamp);
    if messages.len() > limit {
        messages.drain(..messages.len() - limit);
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperchat_core::models::chat::ChatRole;

    fn msg(content: &str, millis: i64) -> ChatMessage {
        ChatMessage {
            role: ChatRole::User,
            content: content.to_string(),
            timestamp: jiff::Timestamp::from_millisecond(millis).unwrap(),
        }
    }

    #[test]
    fn tail_returns_ascending_order() {
        let out = tail_in_order(vec![msg("c", 30), msg("a", 10), msg("b", 20)], 10);
        let contents: Vec<_> = out.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["a", "b", "c"]);
    }

    #[test]
    fn tail_keeps_most_recent() {
        let out = tail_in_order(vec![msg("a", 10), msg("b", 20), msg("c", 30)], 2);
        let contents: Vec<_> = out.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["b", "c"]);
    }

    #[test]
    fn tail_of_empty_is_empty() {
        assert!(tail_in_order(Vec::new(), 5).is_empty());
    }
}
