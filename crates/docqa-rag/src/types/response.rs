//! Response types for indexing and chat

use serde::{Deserialize, Serialize};

use super::chunk::{ScoredPayload, StoredChunk};

/// One retrieved passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Chunk text
    pub content: String,
    /// Filename the chunk came from
    pub source_filename: String,
    /// Similarity score (higher is better)
    pub score: f32,
}

impl From<ScoredPayload> for RetrievalResult {
    fn from(hit: ScoredPayload) -> Self {
        Self {
            content: hit.payload.content,
            source_filename: hit.payload.source_filename,
            score: hit.score,
        }
    }
}

/// Result of indexing one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOutcome {
    /// Original filename
    pub filename: String,
    /// Entries written to the vector index
    pub chunks_stored: usize,
    /// Human-readable summary
    pub message: String,
}

impl IndexOutcome {
    /// Outcome with the standard summary message
    pub fn new(filename: impl Into<String>, chunks_stored: usize) -> Self {
        let filename = filename.into();
        let message = format!(
            "Successfully indexed {} chunks from '{}'",
            chunks_stored, filename
        );
        Self {
            filename,
            chunks_stored,
            message,
        }
    }
}

/// Answer plus the files that backed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOutcome {
    /// Generated answer
    pub answer: String,
    /// Distinct source filenames, most relevant first
    pub sources: Vec<String>,
}

/// Health endpoint body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" when the process answers
    pub status: String,
    /// Entries in the vector index (0 when the index is unreachable)
    pub documents_count: usize,
}

/// One page of the chunk browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPage {
    /// Entries in the index
    pub total_chunks: usize,
    /// Entries on this page
    pub showing: usize,
    /// Entries skipped
    pub offset: usize,
    /// Page content
    pub chunks: Vec<StoredChunk>,
}
