//! HTTP API server
//!
//! Exposes the suggestion and transcription flows over axum. Provider
//! calls are async end to end, so no handler ever blocks the accept
//! loop; the only shared mutable state lives behind the history store's
//! own lock.

mod handlers;

pub use handlers::{ChatSuggestionRequest, ChatSuggestionResponse};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{ParleyError, Result};
use crate::keys::KeyPool;
use crate::provider::GroqClient;
use crate::suggest::{HistoryStore, SuggestionService};
use crate::transcribe::TranscriptionService;

/// Shared application state for all handlers
pub struct AppState {
    pub suggest: SuggestionService,
    pub transcribe: TranscriptionService,
}

/// The API server
pub struct ApiServer {
    config: Config,
}

impl ApiServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Start the server and listen for requests
    pub async fn serve(&self) -> Result<()> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.provider.timeout_secs))
            .build()
            .map_err(|e| ParleyError::Server(format!("Failed to create HTTP client: {e}")))?;

        let client = GroqClient::new(http, &self.config.provider);
        let pool = Arc::new(KeyPool::new());
        let history = Arc::new(HistoryStore::new());

        let state = Arc::new(AppState {
            suggest: SuggestionService::new(client.clone(), Arc::clone(&pool), history),
            transcribe: TranscriptionService::new(client, pool),
        });

        let app = create_router(state);

        let addr: SocketAddr = self
            .config
            .server
            .listen_addr
            .parse()
            .map_err(|e| ParleyError::Config(format!("Invalid listen address: {e}")))?;

        tracing::info!("Starting API server on {addr}");
        tracing::info!("Chat model: {}", self.config.provider.chat_model);
        tracing::info!(
            "Transcription model: {}",
            self.config.provider.transcription_model
        );

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ParleyError::Server(format!("Failed to bind to {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ParleyError::Server(format!("Server error: {e}")))?;

        tracing::info!("API server shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat/options", post(handlers::chat_options_handler))
        .route("/audio/transcribe", post(handlers::transcribe_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint - returns JSON status
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
