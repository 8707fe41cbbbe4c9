use serde::{Deserialize, Serialize};

/// A chunk returned by the vector index for a query, with its cosine score
/// and the filename of the document it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub document: String,
    pub text: String,
    pub score: f32,
}
