//! Core types for the RAG system

pub mod chunk;
pub mod query;
pub mod response;

pub use chunk::{ChunkPayload, ScoredPayload, StoredChunk, StoredChunkEntry, TextChunk};
pub use query::{ChatRequest, ChunksQuery};
pub use response::{
    ChatOutcome, ChunkPage, HealthResponse, IndexOutcome, RetrievalResult,
};
