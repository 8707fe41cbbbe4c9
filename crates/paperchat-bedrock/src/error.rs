use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model discovery failed: {0}")]
    Discovery(String),
}
