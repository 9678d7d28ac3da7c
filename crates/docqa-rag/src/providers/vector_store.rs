//! Vector store provider trait for storing and searching embeddings

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{ScoredPayload, StoredChunk, StoredChunkEntry};

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `InMemoryVectorStore`: process-local cosine index
/// - `QdrantVectorStore`: Qdrant over REST
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Store a batch of entries; all-or-nothing from the caller's view
    ///
    /// Returns the number of entries written.
    async fn upsert(&self, entries: Vec<StoredChunkEntry>) -> Result<usize>;

    /// Nearest entries to `vector`, highest score first
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredPayload>>;

    /// Get total number of entries stored
    async fn count(&self) -> Result<usize>;

    /// Page through stored entries
    async fn scroll(&self, limit: usize, offset: usize) -> Result<Vec<StoredChunk>>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
