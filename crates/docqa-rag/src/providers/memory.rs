//! Process-local vector index with exact cosine search

use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{ScoredPayload, StoredChunk, StoredChunkEntry};

use super::vector_store::VectorStoreProvider;

/// In-memory vector index
///
/// Entries keep insertion order, which is also the scroll order. Contents are
/// lost when the process exits.
pub struct InMemoryVectorStore {
    dimensions: usize,
    index: RwLock<Index>,
}

/// Entries in insertion order plus each id's position in `entries`
#[derive(Default)]
struct Index {
    entries: Vec<StoredChunkEntry>,
    positions: HashMap<Uuid, usize>,
}

impl InMemoryVectorStore {
    /// Create an empty index for vectors of `dimensions` length
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            index: RwLock::new(Index::default()),
        }
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::storage(format!(
                "Vector has {} dimensions, index expects {}",
                vector.len(),
                self.dimensions
            )));
        }
        Ok(())
    }
}

/// Cosine similarity in [-1, 1]; zero vectors score 0
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    async fn upsert(&self, entries: Vec<StoredChunkEntry>) -> Result<usize> {
        // Validate the whole batch before touching the index
        for entry in &entries {
            self.check_dimensions(&entry.vector)?;
        }

        let written = entries.len();
        let mut index = self.index.write();
        let Index { entries: stored, positions } = &mut *index;
        for entry in entries {
            match positions.get(&entry.id) {
                Some(&pos) => stored[pos] = entry,
                None => {
                    positions.insert(entry.id, stored.len());
                    stored.push(entry);
                }
            }
        }

        Ok(written)
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredPayload>> {
        self.check_dimensions(vector)?;

        let index = self.index.read();
        let mut hits: Vec<ScoredPayload> = index
            .entries
            .iter()
            .map(|entry| ScoredPayload {
                id: entry.id,
                payload: entry.payload.clone(),
                score: cosine_similarity(vector, &entry.vector),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(top_k);

        Ok(hits)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.index.read().entries.len())
    }

    async fn scroll(&self, limit: usize, offset: usize) -> Result<Vec<StoredChunk>> {
        Ok(self
            .index
            .read()
            .entries
            .iter()
            .skip(offset)
            .take(limit)
            .map(|entry| StoredChunk::from_payload(entry.id, entry.payload.clone()))
            .collect())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
