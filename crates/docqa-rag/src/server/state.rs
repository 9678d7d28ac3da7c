//! Application state for the HTTP server

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{RagConfig, VectorBackend};
use crate::error::Result;
use crate::providers::{
    shared_providers, DocumentExtractor, EmbeddingProvider, FileExtractor, InMemoryVectorStore,
    LlmProvider, QdrantVectorStore, VectorStoreProvider,
};
use crate::rag::RagOrchestrator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Indexing and chat pipelines
    orchestrator: RagOrchestrator,
}

impl AppState {
    /// Build providers from configuration and wire the orchestrator
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let (embedder, llm) = shared_providers(&config.llm, &config.embeddings)?;
        tracing::info!(
            "Ollama providers initialized ({} for embeddings, {} for generation)",
            config.embeddings.model,
            config.llm.generate_model
        );

        // The index schema follows whatever the embedder produces
        let dimensions = embedder.dimensions();
        let store: Arc<dyn VectorStoreProvider> = match config.vector_db.backend {
            VectorBackend::Memory => {
                tracing::info!("Using in-memory vector index ({} dimensions)", dimensions);
                Arc::new(InMemoryVectorStore::new(dimensions))
            }
            VectorBackend::Qdrant => {
                let qdrant = QdrantVectorStore::new(&config.vector_db, dimensions)?;
                qdrant.ensure_collection().await?;
                tracing::info!("Using Qdrant at {}", config.vector_db.url);
                Arc::new(qdrant)
            }
        };

        tokio::fs::create_dir_all(&config.upload.dir).await?;

        let state = Self::from_parts(
            config,
            Arc::new(FileExtractor::new()),
            Arc::new(embedder),
            store,
            Arc::new(llm),
        )?;

        let health = state.orchestrator().provider_health().await;
        if health.all_up() {
            tracing::info!("All providers reachable");
        } else if !health.llm || !health.embedder {
            let config = state.config();
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!(
                "Start it with `ollama serve`, then pull `{}` and `{}`",
                config.embeddings.model,
                config.llm.generate_model
            );
        }

        Ok(state)
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(
        config: RagConfig,
        extractor: Arc<dyn DocumentExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let orchestrator =
            RagOrchestrator::new(&config.chunking, extractor, embedder, store, llm)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                orchestrator,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the orchestrator
    pub fn orchestrator(&self) -> &RagOrchestrator {
        &self.inner.orchestrator
    }

    /// Directory uploads are staged in
    pub fn upload_dir(&self) -> &Path {
        &self.inner.config.upload.dir
    }

    /// Unique staging path for an uploaded file
    pub fn staging_path(&self, filename: &str) -> PathBuf {
        self.upload_dir()
            .join(format!("{}_{}", uuid::Uuid::new_v4(), filename))
    }
}
