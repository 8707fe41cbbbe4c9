use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("PDF extraction failed: {0}")]
    Extract(String),

    #[error("document contains no extractable text")]
    EmptyDocument,

    #[error("embedding failed: {0}")]
    Embedding(String),
}
