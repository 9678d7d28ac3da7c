//! Indexing and question-answering pipelines over the provider traits

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::generation::{PromptBuilder, SYSTEM_PROMPT};
use crate::ingestion::TextChunker;
use crate::providers::{DocumentExtractor, EmbeddingProvider, LlmProvider, VectorStoreProvider};
use crate::types::{
    query::{check_question, check_top_k},
    ChatOutcome, ChunkPage, IndexOutcome, RetrievalResult, StoredChunkEntry,
};

/// Largest page the chunk browser returns
pub const MAX_PAGE_SIZE: usize = 100;

/// Sequences extraction, chunking, embedding, storage and generation
///
/// Holds no mutable state of its own: every call is a linear chain of
/// awaited collaborator calls, so one instance can serve concurrent requests.
pub struct RagOrchestrator {
    chunker: TextChunker,
    extractor: Arc<dyn DocumentExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    llm: Arc<dyn LlmProvider>,
}

impl RagOrchestrator {
    /// Wire the collaborators together; fails on an invalid chunk window
    pub fn new(
        chunking: &ChunkingConfig,
        extractor: Arc<dyn DocumentExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let chunker = TextChunker::from_config(chunking)?;

        tracing::info!(
            "RAG orchestrator ready: chunk {}/{} chars, embedder={}, store={}, llm={} ({})",
            chunker.window_size(),
            chunker.overlap(),
            embedder.name(),
            store.name(),
            llm.name(),
            llm.model()
        );

        Ok(Self {
            chunker,
            extractor,
            embedder,
            store,
            llm,
        })
    }

    /// Extract, chunk, embed and store one document
    ///
    /// Entries for `original_filename` indexed earlier are left untouched, so
    /// indexing the same file twice stores it twice.
    pub async fn index_document(
        &self,
        file_path: &Path,
        original_filename: &str,
    ) -> Result<IndexOutcome> {
        tracing::info!("Indexing '{}'", original_filename);

        let text = self.extractor.extract(file_path).await?;
        tracing::debug!("Extracted {} bytes from '{}'", text.len(), original_filename);

        let chunks = self.chunker.split(&text);
        if chunks.is_empty() {
            tracing::warn!("'{}' produced no chunks", original_filename);
            return Err(Error::EmptyDocument(original_filename.to_string()));
        }
        tracing::info!("Split '{}' into {} chunks", original_filename, chunks.len());

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "Embedded {} of {} chunks from '{}'",
                vectors.len(),
                chunks.len(),
                original_filename
            )));
        }

        let entries: Vec<StoredChunkEntry> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| StoredChunkEntry::new(chunk, vector, original_filename))
            .collect();

        let stored = self.store.upsert(entries).await?;
        tracing::info!("Stored {} chunks from '{}'", stored, original_filename);

        Ok(IndexOutcome::new(original_filename, stored))
    }

    /// Answer a question from the `top_k` most similar chunks
    ///
    /// Invalid input is rejected before any collaborator is called. Every
    /// later failure comes back as [`Error::Chat`] carrying the cause.
    pub async fn chat(&self, question: &str, top_k: usize) -> Result<ChatOutcome> {
        check_question(question)?;
        check_top_k(top_k)?;

        self.answer(question, top_k).await.map_err(|e| {
            tracing::error!("Chat failed: {}", e);
            Error::chat(e)
        })
    }

    async fn answer(&self, question: &str, top_k: usize) -> Result<ChatOutcome> {
        let query_vector = self.embedder.embed(question).await?;

        let mut results: Vec<RetrievalResult> = self
            .store
            .query(&query_vector, top_k)
            .await?
            .into_iter()
            .map(RetrievalResult::from)
            .collect();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        tracing::debug!("Retrieved {} chunks for top_k={}", results.len(), top_k);

        let context = PromptBuilder::build_context(&results);
        let answer = self.llm.generate(SYSTEM_PROMPT, question, &context).await?;

        Ok(ChatOutcome {
            answer,
            sources: unique_sources(&results),
        })
    }

    /// Number of entries in the vector index, 0 when it cannot be reached
    pub async fn collection_count(&self) -> usize {
        match self.store.count().await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Could not count indexed chunks: {}", e);
                0
            }
        }
    }

    /// Page through stored chunks; `limit` is clamped to `1..=100`
    ///
    /// An offset at or past the end yields an empty page without scrolling.
    pub async fn list_chunks(&self, limit: usize, offset: usize) -> Result<ChunkPage> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);

        let total_chunks = self.store.count().await?;
        let chunks = if offset >= total_chunks {
            Vec::new()
        } else {
            self.store.scroll(limit, offset).await?
        };

        Ok(ChunkPage {
            total_chunks,
            showing: chunks.len(),
            offset,
            chunks,
        })
    }

    /// Probe every collaborator; a probe that errors counts as down
    pub async fn provider_health(&self) -> ProviderHealth {
        let embedder = self.embedder.health_check().await.unwrap_or(false);
        let store = self.store.health_check().await.unwrap_or(false);
        let llm = self.llm.health_check().await.unwrap_or(false);

        for (up, role, name) in [
            (embedder, "embedder", self.embedder.name()),
            (store, "vector index", self.store.name()),
            (llm, "generator", self.llm.name()),
        ] {
            if !up {
                tracing::warn!("{} '{}' is not reachable", role, name);
            }
        }

        ProviderHealth { embedder, store, llm }
    }
}

/// Reachability of each collaborator, as reported by its own probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderHealth {
    pub embedder: bool,
    pub store: bool,
    pub llm: bool,
}

impl ProviderHealth {
    pub fn all_up(&self) -> bool {
        self.embedder && self.store && self.llm
    }
}

/// Source filenames in first-seen order, without repeats
fn unique_sources(results: &[RetrievalResult]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for result in results {
        if !sources.contains(&result.source_filename) {
            sources.push(result.source_filename.clone());
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use crate::providers::InMemoryVectorStore;
    use crate::types::{ChunkPayload, ScoredPayload, StoredChunk};

    const DIMS: usize = 3;

    struct FixedExtractor(String);

    #[async_trait]
    impl DocumentExtractor for FixedExtractor {
        async fn extract(&self, _path: &Path) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl DocumentExtractor for FailingExtractor {
        async fn extract(&self, path: &Path) -> Result<String> {
            Err(Error::extraction(path.display().to_string(), "corrupt file"))
        }
    }

    /// Deterministic embedder: vector derived from the text's leading bytes
    #[derive(Default)]
    struct HashEmbedder {
        calls: AtomicUsize,
        batch_calls: AtomicUsize,
        fail: bool,
    }

    fn vector_for(text: &str) -> Vec<f32> {
        let bytes = text.as_bytes();
        (0..DIMS)
            .map(|i| bytes.get(i).copied().unwrap_or(1) as f32)
            .collect()
    }

    #[async_trait]
    impl EmbeddingProvider for HashEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            if self.fail {
                return Err(Error::embedding("model offline"));
            }
            Ok(vector_for(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.batch_calls.fetch_add(1, AtomicOrdering::SeqCst);
            if self.fail {
                return Err(Error::embedding("model offline"));
            }
            Ok(texts.iter().map(|t| vector_for(t)).collect())
        }

        fn dimensions(&self) -> usize {
            DIMS
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "hash"
        }
    }

    /// Embedder that drops the last vector of every batch
    struct ShortEmbedder;

    #[async_trait]
    impl EmbeddingProvider for ShortEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vector_for(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().skip(1).map(|t| vector_for(t)).collect())
        }

        fn dimensions(&self) -> usize {
            DIMS
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "short"
        }
    }

    /// Records the context it was given and echoes a fixed answer
    #[derive(Default)]
    struct RecordingLlm {
        contexts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl LlmProvider for RecordingLlm {
        async fn generate(&self, system: &str, _question: &str, context: &str) -> Result<String> {
            assert_eq!(system, SYSTEM_PROMPT);
            self.contexts.lock().push(context.to_string());
            if self.fail {
                return Err(Error::llm("generation timed out"));
            }
            Ok("answer".to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(!self.fail)
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> &str {
            "test-model"
        }
    }

    /// Returns canned hits in the given order and counts writes
    #[derive(Default)]
    struct ScriptedStore {
        hits: Vec<ScoredPayload>,
        upserts: AtomicUsize,
        queries: AtomicUsize,
        scrolls: AtomicUsize,
        fail_count: bool,
        fail_upsert: bool,
    }

    #[async_trait]
    impl VectorStoreProvider for ScriptedStore {
        async fn upsert(&self, entries: Vec<StoredChunkEntry>) -> Result<usize> {
            self.upserts.fetch_add(1, AtomicOrdering::SeqCst);
            if self.fail_upsert {
                return Err(Error::storage("write rejected"));
            }
            Ok(entries.len())
        }

        async fn query(&self, _vector: &[f32], top_k: usize) -> Result<Vec<ScoredPayload>> {
            self.queries.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(self.hits.iter().take(top_k).cloned().collect())
        }

        async fn count(&self) -> Result<usize> {
            if self.fail_count {
                return Err(Error::storage("connection refused"));
            }
            Ok(self.hits.len())
        }

        async fn scroll(&self, _limit: usize, _offset: usize) -> Result<Vec<StoredChunk>> {
            self.scrolls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(Vec::new())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(!self.fail_count)
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn hit(content: &str, file: &str, score: f32) -> ScoredPayload {
        ScoredPayload {
            id: uuid::Uuid::new_v4(),
            payload: ChunkPayload {
                source_filename: file.to_string(),
                chunk_index: 0,
                content: content.to_string(),
            },
            score,
        }
    }

    fn chunking(window: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size: window,
            chunk_overlap: overlap,
        }
    }

    fn orchestrator(
        text: &str,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> RagOrchestrator {
        RagOrchestrator::new(
            &chunking(10, 2),
            Arc::new(FixedExtractor(text.to_string())),
            embedder,
            store,
            llm,
        )
        .unwrap()
    }

    fn path() -> PathBuf {
        PathBuf::from("/tmp/upload.txt")
    }

    #[test]
    fn test_invalid_chunking_rejected() {
        let result = RagOrchestrator::new(
            &chunking(10, 10),
            Arc::new(FixedExtractor(String::new())),
            Arc::new(HashEmbedder::default()),
            Arc::new(InMemoryVectorStore::new(DIMS)),
            Arc::new(RecordingLlm::default()),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_index_document_stores_every_chunk() {
        let store = Arc::new(InMemoryVectorStore::new(DIMS));
        let embedder = Arc::new(HashEmbedder::default());
        let rag = orchestrator(
            "abcdefghijklmnopqrstuvwxy",
            embedder.clone(),
            store.clone(),
            Arc::new(RecordingLlm::default()),
        );

        let outcome = rag.index_document(&path(), "alphabet.txt").await.unwrap();

        // windows start at 0, 8, 16
        assert_eq!(outcome.chunks_stored, 3);
        assert_eq!(outcome.filename, "alphabet.txt");
        assert_eq!(
            outcome.message,
            "Successfully indexed 3 chunks from 'alphabet.txt'"
        );
        assert_eq!(embedder.batch_calls.load(AtomicOrdering::SeqCst), 1);

        let page = store.scroll(10, 0).await.unwrap();
        let indices: Vec<_> = page.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(page.iter().all(|c| c.source_filename == "alphabet.txt"));
        assert_eq!(page[1].content, "ijklmnopqr");
    }

    #[tokio::test]
    async fn test_empty_document_never_reaches_store() {
        let store = Arc::new(ScriptedStore::default());
        let embedder = Arc::new(HashEmbedder::default());
        let rag = orchestrator(
            "  \n\t  ",
            embedder.clone(),
            store.clone(),
            Arc::new(RecordingLlm::default()),
        );

        let result = rag.index_document(&path(), "blank.txt").await;

        assert!(matches!(result, Err(Error::EmptyDocument(ref f)) if f == "blank.txt"));
        assert_eq!(store.upserts.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(embedder.batch_calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extraction_failure_propagates() {
        let store = Arc::new(ScriptedStore::default());
        let rag = RagOrchestrator::new(
            &chunking(10, 2),
            Arc::new(FailingExtractor),
            Arc::new(HashEmbedder::default()),
            store.clone(),
            Arc::new(RecordingLlm::default()),
        )
        .unwrap();

        let result = rag.index_document(&path(), "broken.pdf").await;
        assert!(matches!(result, Err(Error::Extraction { .. })));
        assert_eq!(store.upserts.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_embedding_count_mismatch() {
        let store = Arc::new(ScriptedStore::default());
        let rag = orchestrator(
            "abcdefghijklmnopqrstuvwxy",
            Arc::new(ShortEmbedder),
            store.clone(),
            Arc::new(RecordingLlm::default()),
        );

        let result = rag.index_document(&path(), "alphabet.txt").await;
        assert!(matches!(result, Err(Error::Embedding(_))));
        assert_eq!(store.upserts.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reindexing_duplicates_entries() {
        let store = Arc::new(InMemoryVectorStore::new(DIMS));
        let rag = orchestrator(
            "abcdefghijklmnopqrstuvwxy",
            Arc::new(HashEmbedder::default()),
            store.clone(),
            Arc::new(RecordingLlm::default()),
        );

        rag.index_document(&path(), "alphabet.txt").await.unwrap();
        assert_eq!(rag.collection_count().await, 3);

        rag.index_document(&path(), "alphabet.txt").await.unwrap();
        assert_eq!(rag.collection_count().await, 6);
    }

    #[tokio::test]
    async fn test_chat_returns_answer_and_ordered_sources() {
        let store = Arc::new(ScriptedStore {
            hits: vec![
                hit("first", "fileA.pdf", 0.9),
                hit("second", "fileB.txt", 0.8),
                hit("third", "fileA.pdf", 0.7),
            ],
            ..ScriptedStore::default()
        });
        let llm = Arc::new(RecordingLlm::default());
        let rag = orchestrator("", Arc::new(HashEmbedder::default()), store, llm.clone());

        let outcome = rag.chat("What is in the files?", 3).await.unwrap();

        assert_eq!(outcome.answer, "answer");
        assert_eq!(outcome.sources, vec!["fileA.pdf", "fileB.txt"]);
        assert_eq!(
            llm.contexts.lock()[0],
            "[1] first\n\n[2] second\n\n[3] third"
        );
    }

    #[tokio::test]
    async fn test_chat_resorts_results_by_score() {
        let store = Arc::new(ScriptedStore {
            hits: vec![hit("low", "b.txt", 0.2), hit("high", "a.txt", 0.95)],
            ..ScriptedStore::default()
        });
        let llm = Arc::new(RecordingLlm::default());
        let rag = orchestrator("", Arc::new(HashEmbedder::default()), store, llm.clone());

        let outcome = rag.chat("question", 5).await.unwrap();

        assert_eq!(outcome.sources, vec!["a.txt", "b.txt"]);
        assert_eq!(llm.contexts.lock()[0], "[1] high\n\n[2] low");
    }

    #[tokio::test]
    async fn test_chat_with_fewer_hits_than_top_k() {
        let store = Arc::new(InMemoryVectorStore::new(DIMS));
        let llm = Arc::new(RecordingLlm::default());
        let rag = orchestrator(
            "short text",
            Arc::new(HashEmbedder::default()),
            store,
            llm.clone(),
        );
        rag.index_document(&path(), "short.txt").await.unwrap();

        let outcome = rag.chat("short?", 20).await.unwrap();

        assert_eq!(outcome.sources, vec!["short.txt"]);
        assert_eq!(llm.contexts.lock()[0], "[1] short text");
    }

    #[tokio::test]
    async fn test_empty_corpus_still_calls_generator() {
        let llm = Arc::new(RecordingLlm::default());
        let rag = orchestrator(
            "",
            Arc::new(HashEmbedder::default()),
            Arc::new(InMemoryVectorStore::new(DIMS)),
            llm.clone(),
        );

        let outcome = rag.chat("Anything?", 5).await.unwrap();

        assert!(outcome.sources.is_empty());
        assert_eq!(llm.contexts.lock().as_slice(), &[String::new()]);
    }

    #[tokio::test]
    async fn test_invalid_chat_input_calls_nothing() {
        let embedder = Arc::new(HashEmbedder::default());
        let store = Arc::new(ScriptedStore::default());
        let llm = Arc::new(RecordingLlm::default());
        let rag = orchestrator("", embedder.clone(), store.clone(), llm.clone());

        for top_k in [0, 21] {
            let result = rag.chat("valid question", top_k).await;
            assert!(matches!(result, Err(Error::Validation(_))));
        }
        assert!(matches!(rag.chat("   ", 5).await, Err(Error::Validation(_))));

        assert_eq!(embedder.calls.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(store.queries.load(AtomicOrdering::SeqCst), 0);
        assert!(llm.contexts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_top_k_bounds_are_inclusive() {
        let rag = orchestrator(
            "",
            Arc::new(HashEmbedder::default()),
            Arc::new(ScriptedStore::default()),
            Arc::new(RecordingLlm::default()),
        );
        assert!(rag.chat("q", 1).await.is_ok());
        assert!(rag.chat("q", 20).await.is_ok());
    }

    #[tokio::test]
    async fn test_embedding_failure_is_wrapped() {
        let llm = Arc::new(RecordingLlm::default());
        let embedder = Arc::new(HashEmbedder {
            fail: true,
            ..HashEmbedder::default()
        });
        let rag = orchestrator("", embedder, Arc::new(ScriptedStore::default()), llm.clone());

        let err = rag.chat("question", 5).await.unwrap_err();
        match err {
            Error::Chat(cause) => assert!(matches!(*cause, Error::Embedding(_))),
            other => panic!("expected chat error, got {other:?}"),
        }
        assert!(llm.contexts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_is_wrapped() {
        let llm = Arc::new(RecordingLlm {
            fail: true,
            ..RecordingLlm::default()
        });
        let rag = orchestrator(
            "",
            Arc::new(HashEmbedder::default()),
            Arc::new(ScriptedStore::default()),
            llm,
        );

        let err = rag.chat("question", 5).await.unwrap_err();
        assert!(matches!(err, Error::Chat(ref cause) if matches!(**cause, Error::Llm(_))));
    }

    #[tokio::test]
    async fn test_collection_count_masks_failure() {
        let rag = orchestrator(
            "",
            Arc::new(HashEmbedder::default()),
            Arc::new(ScriptedStore {
                fail_count: true,
                ..ScriptedStore::default()
            }),
            Arc::new(RecordingLlm::default()),
        );
        assert_eq!(rag.collection_count().await, 0);
        assert!(matches!(rag.list_chunks(10, 0).await, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_list_chunks_pages_and_clamps() {
        let store = Arc::new(InMemoryVectorStore::new(DIMS));
        let rag = orchestrator(
            "abcdefghijklmnopqrstuvwxy",
            Arc::new(HashEmbedder::default()),
            store,
            Arc::new(RecordingLlm::default()),
        );
        rag.index_document(&path(), "alphabet.txt").await.unwrap();

        let page = rag.list_chunks(2, 1).await.unwrap();
        assert_eq!(page.total_chunks, 3);
        assert_eq!(page.showing, 2);
        assert_eq!(page.offset, 1);
        assert_eq!(page.chunks[0].chunk_index, 1);

        let page = rag.list_chunks(0, 0).await.unwrap();
        assert_eq!(page.showing, 1);
    }

    #[tokio::test]
    async fn test_rejected_upsert_is_storage_error() {
        let store = Arc::new(ScriptedStore {
            fail_upsert: true,
            ..ScriptedStore::default()
        });
        let rag = orchestrator(
            "abcdefghijklmnopqrstuvwxy",
            Arc::new(HashEmbedder::default()),
            store.clone(),
            Arc::new(RecordingLlm::default()),
        );

        let result = rag.index_document(&path(), "alphabet.txt").await;

        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(store.upserts.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(rag.collection_count().await, 0);
    }

    #[tokio::test]
    async fn test_wrong_dimension_leaves_index_untouched() {
        // Embedder emits 3-d vectors, the index expects 4
        let store = Arc::new(InMemoryVectorStore::new(DIMS + 1));
        let rag = orchestrator(
            "abcdefghijklmnopqrstuvwxy",
            Arc::new(HashEmbedder::default()),
            store,
            Arc::new(RecordingLlm::default()),
        );

        let result = rag.index_document(&path(), "alphabet.txt").await;

        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(rag.collection_count().await, 0);
    }

    #[tokio::test]
    async fn test_list_chunks_offset_past_end() {
        let store = Arc::new(ScriptedStore {
            hits: vec![hit("only", "a.txt", 0.5)],
            ..ScriptedStore::default()
        });
        let rag = orchestrator(
            "",
            Arc::new(HashEmbedder::default()),
            store.clone(),
            Arc::new(RecordingLlm::default()),
        );

        for offset in [1, 1_000_000, usize::MAX] {
            let page = rag.list_chunks(20, offset).await.unwrap();
            assert_eq!(page.total_chunks, 1);
            assert_eq!(page.showing, 0);
            assert_eq!(page.offset, offset);
        }
        assert_eq!(store.scrolls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_health_reports_each_collaborator() {
        let rag = orchestrator(
            "",
            Arc::new(HashEmbedder::default()),
            Arc::new(ScriptedStore::default()),
            Arc::new(RecordingLlm::default()),
        );
        assert!(rag.provider_health().await.all_up());

        let rag = orchestrator(
            "",
            Arc::new(HashEmbedder::default()),
            Arc::new(ScriptedStore {
                fail_count: true,
                ..ScriptedStore::default()
            }),
            Arc::new(RecordingLlm {
                fail: true,
                ..RecordingLlm::default()
            }),
        );
        let health = rag.provider_health().await;
        assert_eq!(
            health,
            ProviderHealth {
                embedder: true,
                store: false,
                llm: false,
            }
        );
        assert!(!health.all_up());
    }

    #[test]
    fn test_unique_sources_keeps_first_seen_order() {
        let results: Vec<RetrievalResult> = [
            ("fileB", 0.9),
            ("fileA", 0.8),
            ("fileB", 0.7),
            ("fileC", 0.6),
            ("fileA", 0.5),
        ]
        .iter()
        .map(|(file, score)| RetrievalResult {
            content: String::new(),
            source_filename: file.to_string(),
            score: *score,
        })
        .collect();

        assert_eq!(unique_sources(&results), vec!["fileB", "fileA", "fileC"]);
    }
}
