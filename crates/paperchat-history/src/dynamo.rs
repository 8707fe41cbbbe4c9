//! DynamoDB history backend.
//!
//! Table layout: partition key `session_id` (string), sort key `timestamp`
//! (number, epoch milliseconds). Items carry a `ttl` attribute so stale
//! sessions expire after 30 days without a cleanup job.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use tracing::info;
use uuid::Uuid;

use paperchat_core::models::chat::{ChatMessage, ChatRole};

use crate::error::HistoryError;
use crate::store::HistoryStore;

const TTL_SECONDS: i64 = 30 * 86_400;

/// DynamoDB batch-write limit per request.
const DELETE_BATCH: usize = 25;

pub struct DynamoHistory {
    client: Client,
    table: String,
}

impl DynamoHistory {
    pub fn new(config: &SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            table: table.into(),
        }
    }

    /// Fetch every `(session_id, timestamp)` key pair of a session,
    /// following pagination.
    async fn session_keys(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<(String, String)>, HistoryError> {
        let mut keys = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut req = self
                .client
                .query()
                .table_name(&self.table)
                .key_condition_expression("session_id = :sid")
                .expression_attribute_values(":sid", AttributeValue::S(session_id.to_string()))
                .projection_expression("session_id, #ts")
                .expression_attribute_names("#ts", "timestamp");

            if let Some(k) = start_key.take() {
                req = req.set_exclusive_start_key(Some(k));
            }

            let resp = req
                .send()
                .await
                .map_err(|e| HistoryError::Query(e.into_service_error().to_string()))?;

            for item in resp.items() {
                let sid = string_attr(item, "session_id")?;
                let ts = number_attr(item, "timestamp")?;
                keys.push((sid, ts));
            }

            match resp.last_evaluated_key() {
                Some(k) if !k.is_empty() => start_key = Some(k.clone()),
                _ => break,
            }
        }

        Ok(keys)
    }
}

#[async_trait]
impl HistoryStore for DynamoHistory {
    async fn append(&self, session_id: Uuid, message: &ChatMessage) -> Result<(), HistoryError> {
        let ttl = message.timestamp.as_second() + TTL_SECONDS;

        self.client
            .put_item()
            .table_name(&self.table)
            .item("session_id", AttributeValue::S(session_id.to_string()))
            .item(
                "timestamp",
                AttributeValue::N(message.timestamp.as_millisecond().to_string()),
            )
            .item("role", AttributeValue::S(message.role.as_str().to_string()))
            .item("content", AttributeValue::S(message.content.clone()))
            .item("ttl", AttributeValue::N(ttl.to_string()))
            .send()
            .await
            .map_err(|e| HistoryError::PutItem(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn read(&self, session_id: Uuid, limit: usize) -> Result<Vec<ChatMessage>, HistoryError> {
        // Query newest-first with a limit, then flip to ascending order.
        let resp = self
            .client
            .query()
            .table_name(&self.table)
            .key_condition_expression("session_id = :sid")
            .expression_attribute_values(":sid", AttributeValue::S(session_id.to_string()))
            .scan_index_forward(false)
            .limit(limit.try_into().unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| HistoryError::Query(e.into_service_error().to_string()))?;

        let mut messages = resp
            .items()
            .iter()
            .map(message_from_item)
            .collect::<Result<Vec<_>, _>>()?;
        messages.reverse();

        Ok(messages)
    }

    async fn clear(&self, session_id: Uuid) -> Result<(), HistoryError> {
        let keys = self.session_keys(session_id).await?;
        if keys.is_empty() {
            return Ok(());
        }

        for batch in keys.chunks(DELETE_BATCH) {
            let mut requests = Vec::with_capacity(batch.len());
            for (sid, ts) in batch {
                let delete = DeleteRequest::builder()
                    .key("session_id", AttributeValue::S(sid.clone()))
                    .key("timestamp", AttributeValue::N(ts.clone()))
                    .build()
                    .map_err(|e| HistoryError::BatchWrite(e.to_string()))?;
                requests.push(WriteRequest::builder().delete_request(delete).build());
            }

            self.client
                .batch_write_item()
                .request_items(&self.table, requests)
                .send()
                .await
                .map_err(|e| HistoryError::BatchWrite(e.into_service_error().to_string()))?;
        }

        info!(%session_id, deleted = keys.len(), "cleared session history");

        Ok(())
    }
}

fn string_attr(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<String, HistoryError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| HistoryError::MalformedItem(format!("missing string attribute {name}")))
}

fn number_attr(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<String, HistoryError> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .cloned()
        .ok_or_else(|| HistoryError::MalformedItem(format!("missing number attribute {name}")))
}

fn message_from_item(item: &HashMap<String, AttributeValue>) -> Result<ChatMessage, HistoryError> {
    let role = ChatRole::parse(&string_attr(item, "role")?)
        .map_err(|e| HistoryError::MalformedItem(e.to_string()))?;
    let content = string_attr(item, "content")?;

    let millis: i64 = number_attr(item, "timestamp")?
        .parse()
        .map_err(|_| HistoryError::MalformedItem("non-numeric timestamp".to_string()))?;
    let timestamp = jiff::Timestamp::from_millisecond(millis)
        .map_err(|e| HistoryError::MalformedItem(format!("timestamp out of range: {e}")))?;

    Ok(ChatMessage {
        role,
        content,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(role: &str, content: &str, millis: i64) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (
                "session_id".to_string(),
                AttributeValue::S("s".to_string()),
            ),
            (
                "timestamp".to_string(),
                AttributeValue::N(millis.to_string()),
            ),
            ("role".to_string(), AttributeValue::S(role.to_string())),
            (
                "content".to_string(),
                AttributeValue::S(content.to_string()),
            ),
        ])
    }

    #[test]
    fn item_parses_into_message() {
        let msg = message_from_item(&item("assistant", "hello", 1_700_000_000_000)).unwrap();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.content, "hello");
        assert_eq!(msg.timestamp.as_millisecond(), 1_700_000_000_000);
    }

    #[test]
    fn missing_attribute_is_malformed() {
        let mut it = item("user", "hi", 1);
        it.remove("content");
        assert!(matches!(
            message_from_item(&it),
            Err(HistoryError::MalformedItem(_))
        ));
    }

    #[test]
    fn unknown_role_is_malformed() {
        let it = item("robot", "hi", 1);
        assert!(matches!(
            message_from_item(&it),
            Err(HistoryError::MalformedItem(_))
        ));
    }
}
