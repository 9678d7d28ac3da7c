//! Chunk types flowing from the chunker into the vector index

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A window of normalized document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Window text
    pub content: String,
    /// Zero-based position within the document's chunk sequence
    pub index: usize,
}

impl TextChunk {
    /// Create a new chunk
    pub fn new(content: impl Into<String>, index: usize) -> Self {
        Self {
            content: content.into(),
            index,
        }
    }
}

/// Metadata stored next to every vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Filename the chunk was uploaded as
    pub source_filename: String,
    /// Position of the chunk inside that file
    pub chunk_index: usize,
    /// Exact text that was embedded
    pub content: String,
}

/// The unit persisted in the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunkEntry {
    /// Unique across the whole index
    pub id: Uuid,
    /// Embedding of `payload.content`
    pub vector: Vec<f32>,
    /// Stored metadata
    pub payload: ChunkPayload,
}

impl StoredChunkEntry {
    /// Pair a chunk with its embedding under a fresh id
    pub fn new(chunk: TextChunk, vector: Vec<f32>, source_filename: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            vector,
            payload: ChunkPayload {
                source_filename: source_filename.to_string(),
                chunk_index: chunk.index,
                content: chunk.content,
            },
        }
    }
}

/// A similarity match returned by the vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPayload {
    /// Entry id
    pub id: Uuid,
    /// Stored metadata
    pub payload: ChunkPayload,
    /// Similarity score, higher is more relevant
    pub score: f32,
}

/// Listing view of a stored chunk (no vector)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Entry id
    pub id: Uuid,
    /// Filename the chunk came from
    pub source_filename: String,
    /// Position inside that file
    pub chunk_index: usize,
    /// Chunk text
    pub content: String,
}

impl StoredChunk {
    /// Build the listing view from an id and payload
    pub fn from_payload(id: Uuid, payload: ChunkPayload) -> Self {
        Self {
            id,
            source_filename: payload.source_filename,
            chunk_index: payload.chunk_index,
            content: payload.content,
        }
    }
}
