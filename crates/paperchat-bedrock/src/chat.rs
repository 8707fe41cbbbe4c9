//! Chat-oriented Bedrock operations: model discovery and the answer call.
//!
//! # Model discovery
//!
//! Bedrock exposes foundation models (`ListFoundationModels`, the
//! canonical registry with lifecycle status) and inference profiles
//! (`ListInferenceProfiles`, cross-region routing wrappers like
//! `us.anthropic.claude-sonnet-4-6`). The Converse API wants an inference
//! profile ID — bare foundation model IDs fail with "on-demand throughput
//! isn't supported". Not every active model has a profile in the API yet,
//! so discovery starts from the ACTIVE foundation model list and falls
//! back to constructing `us.{model_id}` when no profile was returned.

use std::collections::HashMap;

use aws_sdk_bedrock::types::{
    FoundationModelLifecycleStatus, InferenceProfileStatus, InferenceProfileType,
};
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LlmError;

/// An available chat model (Bedrock inference profile).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatModel {
    /// Inference profile ID, e.g. `us.anthropic.claude-sonnet-4-20250514-v1:0`.
    pub model_id: String,
    /// Human-readable name.
    pub name: String,
}

/// Sampling and length settings for the answer call.
#[derive(Debug, Clone, Copy)]
pub struct InferenceParams {
    pub temperature: f32,
    pub max_tokens: i32,
}

/// List available Anthropic Claude chat models, sorted by name.
///
/// Starts from `ListFoundationModels(provider="anthropic")` filtered to
/// ACTIVE lifecycle (skipping context-window variants like `:48k`), then
/// resolves each to a `us.` inference profile — preferring one returned by
/// `ListInferenceProfiles`, constructing `us.{model_id}` otherwise.
pub async fn list_chat_models(
    config: &aws_config::SdkConfig,
) -> Result<Vec<ChatModel>, LlmError> {
    let client = aws_sdk_bedrock::Client::new(config);

    let active_models = fetch_active_foundation_models(&client).await?;
    let us_profiles = fetch_us_inference_profiles(&client).await?;

    let mut models: Vec<ChatModel> = active_models
        .into_iter()
        .map(|(model_id, model_name)| {
            if let Some((profile_id, profile_name)) = us_profiles.get(&model_id) {
                ChatModel {
                    model_id: profile_id.clone(),
                    name: profile_name.clone(),
                }
            } else {
                ChatModel {
                    model_id: format!("us.{model_id}"),
                    name: model_name,
                }
            }
        })
        .collect();

    models.sort_by(|a, b| a.name.cmp(&b.name));

    info!(count = models.len(), "discovered chat models");

    Ok(models)
}

/// Fetch active Anthropic Claude foundation models, returning
/// `(model_id, name)`. Context-window variants (`:48k`, `:200k`, …) are
/// skipped — only the base model ID is kept.
async fn fetch_active_foundation_models(
    client: &aws_sdk_bedrock::Client,
) -> Result<Vec<(String, String)>, LlmError> {
    let response = client
        .list_foundation_models()
        .by_provider("anthropic")
        .send()
        .await
        .map_err(|e| LlmError::Discovery(e.into_service_error().to_string()))?;

    let models: Vec<(String, String)> = response
        .model_summaries()
        .iter()
        .filter(|m| {
            let id = m.model_id();
            let is_claude = id.contains("claude");
            let is_active = m
                .model_lifecycle()
                .map(|lc| *lc.status() == FoundationModelLifecycleStatus::Active)
                .unwrap_or(false);
            let is_variant = id.rsplit_once(':').is_some_and(|(_, suffix)| {
                suffix.chars().next().is_some_and(|c| c.is_ascii_digit()) && suffix != "0"
            });
            is_claude && is_active && !is_variant
        })
        .map(|m| {
            let name = m.model_name().unwrap_or(m.model_id()).to_string();
            (m.model_id().to_string(), name)
        })
        .collect();

    Ok(models)
}

/// Fetch US-scoped Claude inference profiles, as a map from bare
/// foundation model ID to `(profile_id, profile_name)`.
async fn fetch_us_inference_profiles(
    client: &aws_sdk_bedrock::Client,
) -> Result<HashMap<String, (String, String)>, LlmError> {
    let response = client
        .list_inference_profiles()
        .type_equals(InferenceProfileType::SystemDefined)
        .max_results(100)
        .send()
        .await
        .map_err(|e| LlmError::Discovery(e.into_service_error().to_string()))?;

    let mut map = HashMap::new();

    for p in response.inference_profile_summaries() {
        let id = p.inference_profile_id();
        if !id.starts_with("us.") || !id.contains("anthropic.claude") {
            continue;
        }
        if *p.status() != InferenceProfileStatus::Active {
            continue;
        }
        let bare_id = &id[3..];
        map.insert(
            bare_id.to_string(),
            (id.to_string(), p.inference_profile_name().to_string()),
        );
    }

    Ok(map)
}

/// Ask the model a single question under a system prompt and return its
/// reply text.
///
/// The retrieval pipeline is single-turn: each question stands alone with
/// its context block; conversation memory lives in the history store, not
/// in the model call.
pub async fn answer_question(
    config: &aws_config::SdkConfig,
    model_id: &str,
    system_prompt: &str,
    question: &str,
    params: InferenceParams,
) -> Result<String, LlmError> {
    let client = aws_sdk_bedrockruntime::Client::new(config);

    let message = Message::builder()
        .role(ConversationRole::User)
        .content(ContentBlock::Text(question.to_string()))
        .build()
        .map_err(|e| LlmError::Invocation(e.to_string()))?;

    let inference = InferenceConfiguration::builder()
        .temperature(params.temperature)
        .max_tokens(params.max_tokens)
        .build();

    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .messages(message)
        .inference_config(inference)
        .send()
        .await
        .map_err(|e| LlmError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| LlmError::ResponseParse("no message in response".to_string()))?;

    let response_text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    Ok(response_text)
}
