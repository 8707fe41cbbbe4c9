use axum::extract::State;
use axum::Json;

use paperchat_bedrock::chat::{list_chat_models, ChatModel};

use crate::error::ApiError;
use crate::state::AppState;

/// Available hosted chat models (backs the frontend model picker).
pub async fn list_models(State(state): State<AppState>) -> Result<Json<Vec<ChatModel>>, ApiError> {
    let models = list_chat_models(&state.aws).await?;
    Ok(Json(models))
}
