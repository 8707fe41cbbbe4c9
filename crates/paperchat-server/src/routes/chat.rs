use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use paperchat_bedrock::chat::{answer_question, InferenceParams};
use paperchat_bedrock::prompt;
use paperchat_core::models::chat::{ChatMessage, ChatRole};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub question: String,
    /// Overrides the configured default model when set (the frontend's
    /// model picker).
    #[serde(default)]
    pub model_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Answer a question against the indexed documents.
///
/// Pipeline: persist the user message, embed the question, retrieve the
/// top-k chunks, assemble the prompt, call the hosted model, persist and
/// return the answer with its source documents. Questions stand alone —
/// history is persisted for the UI, not fed back into the model.
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".to_string()));
    }
    if state.index.is_empty() {
        return Err(ApiError::BadRequest(
            "no documents indexed — upload a PDF first".to_string(),
        ));
    }

    // The user message is saved up front; a failed model call leaves the
    // question in history and the session usable.
    state
        .history
        .append(req.session_id, &ChatMessage::now(ChatRole::User, question))
        .await?;

    let query_vec = state.embedder.embed_query(question).await?;
    let retrieved = state.index.search(&query_vec, state.settings.retrieval_k);

    let system_prompt = prompt::system_prompt_with_context(&retrieved);
    let sources = prompt::source_set(&retrieved);
    let model_id = req
        .model_id
        .as_deref()
        .unwrap_or(&state.settings.model_id);

    let answer = answer_question(
        &state.aws,
        model_id,
        &system_prompt,
        question,
        InferenceParams {
            temperature: state.settings.temperature,
            max_tokens: state.settings.max_tokens,
        },
    )
    .await?;

    state
        .history
        .append(
            req.session_id,
            &ChatMessage::now(ChatRole::Assistant, answer.clone()),
        )
        .await?;

    info!(
        session_id = %req.session_id,
        retrieved = retrieved.len(),
        sources = sources.len(),
        "answered question"
    );

    Ok(Json(ChatResponse { answer, sources }))
}
