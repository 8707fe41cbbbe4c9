//! Single-document S3 history backend.
//!
//! Each session is one JSON object at `sessions/{session_id}.json`; every
//! append is an unsynchronized read-modify-write of the whole document.
//! Concurrent writers to the same session can lose updates — accepted for
//! the single-user deployment this backend targets.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use uuid::Uuid;

use paperchat_core::models::chat::{ChatMessage, SessionDocument};
use paperchat_core::s3_keys;
use paperchat_storage::error::StorageError;
use paperchat_storage::{objects, state};

use crate::error::HistoryError;
use crate::store::{tail_in_order, HistoryStore};

pub struct S3DocHistory {
    client: Client,
    bucket: String,
}

impl S3DocHistory {
    pub fn new(config: &SdkConfig, bucket: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            bucket: bucket.into(),
        }
    }

    async fn load(&self, session_id: Uuid) -> Result<SessionDocument, HistoryError> {
        let key = s3_keys::session(session_id);
        match state::load_state(&self.client, &self.bucket, &key).await {
            Ok(doc) => Ok(doc),
            Err(StorageError::NotFound { .. }) => Ok(SessionDocument::empty(session_id)),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl HistoryStore for S3DocHistory {
    async fn append(&self, session_id: Uuid, message: &ChatMessage) -> Result<(), HistoryError> {
        let mut doc = self.load(session_id).await?;
        doc.messages.push(message.clone());
        doc.updated_at = jiff::Timestamp::now();

        let key = s3_keys::session(session_id);
        state::save_state(&self.client, &self.bucket, &key, &doc).await?;
        Ok(())
    }

    async fn read(&self, session_id: Uuid, limit: usize) -> Result<Vec<ChatMessage>, HistoryError> {
        let doc = self.load(session_id).await?;
        Ok(tail_in_order(doc.messages, limit))
    }

    async fn clear(&self, session_id: Uuid) -> Result<(), HistoryError> {
        let key = s3_keys::session(session_id);
        objects::delete_object(&self.client, &self.bucket, &key).await?;
        Ok(())
    }
}
