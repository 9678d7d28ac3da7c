//! Chunk browser endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{ChunkPage, ChunksQuery};

/// GET /chunks?limit=20&offset=0 - page through stored chunks
pub async fn list_chunks(
    State(state): State<AppState>,
    Query(query): Query<ChunksQuery>,
) -> Result<Json<ChunkPage>> {
    let page = state
        .orchestrator()
        .list_chunks(query.limit, query.offset)
        .await?;
    Ok(Json(page))
}
