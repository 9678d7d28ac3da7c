//! HTTP routes

pub mod chat;
pub mod chunks;
pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all routes
pub fn routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        // Uploads get the configured body limit instead of axum's 2MB default
        .route(
            "/index",
            post(index::index_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/chat", post(chat::chat))
        .route("/chunks", get(chunks::list_chunks))
}
