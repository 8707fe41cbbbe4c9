//! Integration tests against real AWS backends.
//!
//! These tests call real AWS APIs and require valid credentials in the
//! environment (e.g. `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`) plus:
//!
//! - `PAPERCHAT_TEST_TABLE` — a DynamoDB table with `session_id` (S) as
//!   partition key and `timestamp` (N) as sort key
//! - `PAPERCHAT_TEST_BUCKET` — a writable S3 bucket
//!
//! Run with: `cargo test -p paperchat-history --test live_backends -- --ignored`

use uuid::Uuid;

use paperchat_core::models::chat::{ChatMessage, ChatRole};
use paperchat_history::dynamo::DynamoHistory;
use paperchat_history::s3doc::S3DocHistory;
use paperchat_history::HistoryStore;

async fn build_config() -> aws_config::SdkConfig {
    let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    paperchat_storage::client::build_aws_config(&region).await
}

async fn exercise_store(store: &dyn HistoryStore) {
    let session = Uuid::new_v4();

    store
        .append(session, &ChatMessage::now(ChatRole::User, "first question"))
        .await
        .expect("append user message");
    store
        .append(
            session,
            &ChatMessage::now(ChatRole::Assistant, "first answer"),
        )
        .await
        .expect("append assistant message");

    let messages = store.read(session, 20).await.expect("read history");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "first question");
    assert_eq!(messages[1].role, ChatRole::Assistant);
    assert!(messages[0].timestamp <= messages[1].timestamp);

    // A limit of one keeps only the most recent message.
    let tail = store.read(session, 1).await.expect("read with limit");
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].content, "first answer");

    store.clear(session).await.expect("clear history");
    let after = store.read(session, 20).await.expect("read after clear");
    assert!(after.is_empty(), "cleared session should read empty");
}

#[tokio::test]
#[ignore]
async fn dynamo_append_read_clear() {
    let config = build_config().await;
    let table = std::env::var("PAPERCHAT_TEST_TABLE").expect("PAPERCHAT_TEST_TABLE not set");
    let store = DynamoHistory::new(&config, table);
    exercise_store(&store).await;
}

#[tokio::test]
#[ignore]
async fn s3doc_append_read_clear() {
    let config = build_config().await;
    let bucket = std::env::var("PAPERCHAT_TEST_BUCKET").expect("PAPERCHAT_TEST_BUCKET not set");
    let store = S3DocHistory::new(&config, bucket);
    exercise_store(&store).await;
}
