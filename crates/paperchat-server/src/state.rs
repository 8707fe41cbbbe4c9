use std::sync::Arc;

use aws_config::SdkConfig;
use aws_sdk_s3::Client as S3Client;

use paperchat_history::HistoryStore;
use paperchat_index::{Embedder, VectorIndex};

use crate::config::Settings;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub aws: SdkConfig,
    pub s3: S3Client,
    pub history: Arc<dyn HistoryStore>,
    pub index: Arc<VectorIndex>,
    pub embedder: Arc<Embedder>,
    pub settings: Arc<Settings>,
}
