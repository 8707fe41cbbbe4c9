use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<paperchat_storage::error::StorageError> for ApiError {
    fn from(e: paperchat_storage::error::StorageError) -> Self {
        match e {
            paperchat_storage::error::StorageError::NotFound { key } => {
                ApiError::NotFound(format!("object not found: {key}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<paperchat_history::error::HistoryError> for ApiError {
    fn from(e: paperchat_history::error::HistoryError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<paperchat_index::error::IndexError> for ApiError {
    fn from(e: paperchat_index::error::IndexError) -> Self {
        use paperchat_index::error::IndexError;
        match e {
            // Bad input documents are the client's problem, not ours.
            IndexError::Extract(_) | IndexError::EmptyDocument => {
                ApiError::BadRequest(e.to_string())
            }
            IndexError::Embedding(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<paperchat_bedrock::error::LlmError> for ApiError {
    fn from(e: paperchat_bedrock::error::LlmError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadRequest(format!("malformed multipart upload: {e}"))
    }
}
