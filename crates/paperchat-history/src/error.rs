use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("storage error: {0}")]
    Storage(#[from] paperchat_storage::error::StorageError),

    #[error("DynamoDB PutItem error: {0}")]
    PutItem(String),

    #[error("DynamoDB Query error: {0}")]
    Query(String),

    #[error("DynamoDB BatchWriteItem error: {0}")]
    BatchWrite(String),

    #[error("malformed history item: {0}")]
    MalformedItem(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
