use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::handlers;
use crate::storage::{audio::STATIC_URL_PREFIX, AudioStore, SubmissionStore};
use crate::tts::SpeechClient;

pub struct AppState {
    pub speech: SpeechClient,
    pub submissions: SubmissionStore,
    pub audio: AudioStore,
}

pub fn create_router(state: Arc<AppState>, static_dir: &Path, pages_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/tts", post(handlers::tts))
        .route("/appointment", post(handlers::appointment))
        .route("/contact", post(handlers::contact));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health))
        .route_service("/", ServeFile::new(pages_dir.join("index.html")))
        .route_service("/terms", ServeFile::new(pages_dir.join("terms.html")))
        .route_service("/privacy", ServeFile::new(pages_dir.join("privacy.html")))
        .nest_service(STATIC_URL_PREFIX, ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
