use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::{HistoryBackend, Settings};
use paperchat_history::dynamo::DynamoHistory;
use paperchat_history::s3doc::S3DocHistory;
use paperchat_history::HistoryStore;
use paperchat_index::{Embedder, VectorIndex};
use state::AppState;

/// Upload size ceiling; PDFs routinely exceed axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::from_env()?;

    let aws = paperchat_storage::client::build_aws_config(&settings.region).await;
    let s3 = paperchat_storage::client::s3_client(&aws);

    let history: Arc<dyn HistoryStore> = match settings.history_backend {
        HistoryBackend::Dynamo => {
            Arc::new(DynamoHistory::new(&aws, settings.history_table.clone()))
        }
        HistoryBackend::S3 => Arc::new(S3DocHistory::new(&aws, settings.bucket.clone())),
    };
    info!(backend = ?settings.history_backend, "history store configured");

    // Downloads the embedding model on first run; subsequent starts load
    // it from the local cache.
    let embedder = Arc::new(Embedder::load().await?);

    let state = AppState {
        aws,
        s3,
        history,
        index: Arc::new(VectorIndex::new()),
        embedder,
        settings: Arc::new(settings.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/documents", get(routes::documents::list_documents))
        .route("/api/documents", post(routes::documents::upload))
        .route("/api/documents/sync", post(routes::documents::sync_documents))
        .route(
            "/api/documents/{filename}",
            delete(routes::documents::delete_document),
        )
        .route("/api/chat", post(routes::chat::ask))
        .route("/api/history/{session_id}", get(routes::history::get_history))
        .route(
            "/api/history/{session_id}",
            delete(routes::history::clear_history),
        )
        .route("/api/models", get(routes::models::list_models))
        .fallback_service(ServeDir::new("frontend"))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(axum_mw::from_fn(middleware::request_log))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!("listening on http://{}", settings.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("shutdown signal received");
}
