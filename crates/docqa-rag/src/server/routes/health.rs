//! Liveness endpoint

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::HealthResponse;

/// GET /health - always healthy while the process answers
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        documents_count: state.orchestrator().collection_count().await,
    })
}
