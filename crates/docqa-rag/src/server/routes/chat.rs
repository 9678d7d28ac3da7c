//! Question answering endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{ChatOutcome, ChatRequest};

/// POST /chat - answer a question from indexed documents
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatOutcome>> {
    let start = Instant::now();
    let top_k = request.validate(state.config().server.default_top_k)?;

    tracing::info!("Chat: \"{}\" (top_k={})", request.question, top_k);

    let outcome = state.orchestrator().chat(&request.question, top_k).await?;

    tracing::info!(
        "Answered in {}ms from {} source(s)",
        start.elapsed().as_millis(),
        outcome.sources.len()
    );

    Ok(Json(outcome))
}
