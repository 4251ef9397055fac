use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod storage;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use storage::{AudioStore, SubmissionStore};
use tts::{SecretResolver, SpeechClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local development convenience; absence is fine
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env()?;

    tracing::info!("Voice desk server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", config.addr);
    tracing::info!("Static directory: {}", config.static_dir.display());
    tracing::info!("Pages directory: {}", config.pages_dir.display());

    // Storage must be ready before the first request
    tokio::fs::create_dir_all(&config.static_dir).await?;
    let (submissions, existing) = SubmissionStore::open(&config.submissions_file).await?;
    tracing::info!(
        "Submission store {} holds {} records",
        submissions.path().display(),
        existing
    );

    let resolver = SecretResolver::new(&config.api_key_var, &config.secrets_file);
    if resolver.resolve().is_none() {
        tracing::warn!(
            "No ElevenLabs API key in {} or {}; speech synthesis will fail",
            config.api_key_var,
            config.secrets_file.display()
        );
    }
    let speech = SpeechClient::new(&config.api_url, resolver, &config.default_voice)?;
    tracing::info!("Default voice: {}", speech.default_voice());

    // Create app state
    let state = Arc::new(AppState {
        speech,
        submissions,
        audio: AudioStore::new(&config.static_dir),
    });

    // Create router
    let app = create_router(state, &config.static_dir, &config.pages_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
