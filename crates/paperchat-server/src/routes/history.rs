use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use paperchat_core::models::chat::ChatMessage;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// The most recent messages of a session, in timestamp order.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let limit = query.limit.unwrap_or(state.settings.history_limit);
    let messages = state.history.read(session_id, limit).await?;
    Ok(Json(messages))
}

/// Clear a session's history.
pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    state.history.clear(session_id).await?;
    Ok(Json(()))
}
