//! Local sentence-transformer embeddings via fastembed.
//!
//! Uses `all-MiniLM-L6-v2` (384 dims) on CPU. The model is downloaded from
//! Hugging Face on first use and cached; after that, embedding runs
//! entirely offline. Inference is synchronous ONNX work, so it is pushed
//! onto the blocking thread pool.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use crate::error::IndexError;

pub const MODEL_NAME: &str = "all-minilm-l6-v2";

pub const DIMS: usize = 384;

/// Texts per fastembed batch.
const BATCH_SIZE: usize = 32;

#[derive(Clone)]
pub struct Embedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl Embedder {
    /// Initialize the embedding model, downloading it on first use.
    ///
    /// Initialization blocks on model load (and possibly a download), so
    /// it runs on the blocking pool.
    pub async fn load() -> Result<Self, IndexError> {
        info!(model = MODEL_NAME, "loading embedding model");

        let model = tokio::task::spawn_blocking(|| {
            TextEmbedding::try_new(
                InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
            )
            .map_err(|e| IndexError::Embedding(format!("model init failed: {e}")))
        })
        .await
        .map_err(|e| IndexError::Embedding(e.to_string()))??;

        info!(model = MODEL_NAME, dims = DIMS, "embedding model ready");

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }

    /// Embed a batch of texts, one vector per input, in input order.
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, IndexError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().unwrap();
            model
                .embed(texts, Some(BATCH_SIZE))
                .map_err(|e| IndexError::Embedding(e.to_string()))
        })
        .await
        .map_err(|e| IndexError::Embedding(e.to_string()))?
    }

    /// Embed a single query string.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        let mut vectors = self.embed(vec![text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| IndexError::Embedding("empty embedding response".to_string()))
    }
}
