use serde::{Deserialize, Serialize};

/// A PDF stored in the bucket, as reported by a bucket listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub filename: String,
    pub key: String,
    pub size: i64,
    pub last_modified: Option<String>,
}
