//! Qdrant vector index over its REST API

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::types::{ChunkPayload, ScoredPayload, StoredChunk, StoredChunkEntry};

use super::vector_store::VectorStoreProvider;

/// Qdrant collection client
pub struct QdrantVectorStore {
    client: Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
    dimensions: usize,
}

#[derive(Deserialize)]
struct QdrantResponse<T> {
    result: T,
}

#[derive(Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    points: Vec<PointStruct<'a>>,
}

#[derive(Serialize)]
struct PointStruct<'a> {
    id: Uuid,
    vector: &'a [f32],
    payload: &'a ChunkPayload,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct ScoredPoint {
    id: Uuid,
    score: f32,
    payload: ChunkPayload,
}

#[derive(Serialize)]
struct CountRequest {
    exact: bool,
}

#[derive(Deserialize)]
struct CountResult {
    count: usize,
}

/// Points requested per call while walking the cursor up to an offset
const SKIP_BATCH: usize = 256;

#[derive(Serialize)]
struct ScrollRequest {
    limit: usize,
    with_payload: bool,
    with_vector: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<Value>,
}

#[derive(Deserialize)]
struct ScrollResult {
    points: Vec<RecordPoint>,
    #[serde(default)]
    next_page_offset: Option<Value>,
}

#[derive(Deserialize)]
struct RecordPoint {
    id: Uuid,
    #[serde(default)]
    payload: Option<ChunkPayload>,
}

impl QdrantVectorStore {
    /// Create a client for the configured collection
    pub fn new(config: &VectorDbConfig, dimensions: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            api_key: config.api_key.clone(),
            dimensions,
        })
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!("{}/collections/{}{}", self.base_url, self.collection, suffix)
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("api-key", key),
            None => request,
        }
    }

    /// Send a request and decode the `result` field
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| Error::storage(format!("Qdrant {} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "Qdrant {} failed: HTTP {} - {}",
                what, status, body
            )));
        }

        let parsed: QdrantResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::storage(format!("Failed to parse Qdrant {} response: {}", what, e)))?;
        Ok(parsed.result)
    }

    async fn scroll_page(
        &self,
        limit: usize,
        cursor: Option<Value>,
        with_payload: bool,
    ) -> Result<ScrollResult> {
        let body = ScrollRequest {
            limit,
            with_payload,
            with_vector: false,
            offset: cursor,
        };
        let request = self.client.post(self.collection_url("/points/scroll")).json(&body);
        self.send(request, "scroll").await
    }

    /// Create the collection (cosine distance) unless it already exists
    pub async fn ensure_collection(&self) -> Result<()> {
        let response = self
            .with_auth(self.client.get(self.collection_url("")))
            .send()
            .await
            .map_err(|e| Error::storage(format!("Cannot reach Qdrant at {}: {}", self.base_url, e)))?;

        match response.status() {
            status if status.is_success() => {
                tracing::info!("Using existing Qdrant collection '{}'", self.collection);
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                tracing::info!(
                    "Creating Qdrant collection '{}' ({} dimensions, cosine)",
                    self.collection,
                    self.dimensions
                );
                let body = CreateCollectionRequest {
                    vectors: VectorParams {
                        size: self.dimensions,
                        distance: "Cosine",
                    },
                };
                let _: Value = self
                    .send(self.client.put(self.collection_url("")).json(&body), "create collection")
                    .await?;
                Ok(())
            }
            status => Err(Error::storage(format!(
                "Unexpected status {} while checking collection '{}'",
                status, self.collection
            ))),
        }
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantVectorStore {
    async fn upsert(&self, entries: Vec<StoredChunkEntry>) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let body = UpsertRequest {
            points: entries
                .iter()
                .map(|entry| PointStruct {
                    id: entry.id,
                    vector: &entry.vector,
                    payload: &entry.payload,
                })
                .collect(),
        };

        let request = self
            .client
            .put(self.collection_url("/points?wait=true"))
            .json(&body);
        let _: Value = self.send(request, "upsert").await?;

        Ok(entries.len())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredPayload>> {
        let body = SearchRequest {
            vector,
            limit: top_k,
            with_payload: true,
        };

        let request = self.client.post(self.collection_url("/points/search")).json(&body);
        let points: Vec<ScoredPoint> = self.send(request, "search").await?;

        Ok(points
            .into_iter()
            .map(|p| ScoredPayload {
                id: p.id,
                payload: p.payload,
                score: p.score,
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        let request = self
            .client
            .post(self.collection_url("/points/count"))
            .json(&CountRequest { exact: true });
        let result: CountResult = self.send(request, "count").await?;
        Ok(result.count)
    }

    async fn scroll(&self, limit: usize, offset: usize) -> Result<Vec<StoredChunk>> {
        // Qdrant pages by point id, so walk the cursor past `offset` points
        // without payloads, then fetch one page
        let mut cursor = None;
        let mut remaining = offset;

        while remaining > 0 {
            let page = self.scroll_page(remaining.min(SKIP_BATCH), cursor, false).await?;
            remaining = remaining.saturating_sub(page.points.len());

            match page.next_page_offset {
                Some(next) if !page.points.is_empty() => cursor = Some(next),
                _ => return Ok(Vec::new()),
            }
        }

        let page = self.scroll_page(limit, cursor, true).await?;

        Ok(page
            .points
            .into_iter()
            .filter_map(|p| p.payload.map(|payload| StoredChunk::from_payload(p.id, payload)))
            .collect())
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/healthz", self.base_url);
        match self.with_auth(self.client.get(&url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}
