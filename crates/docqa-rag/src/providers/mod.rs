//! Provider abstractions for extraction, embeddings, generation and vector storage
//!
//! The orchestrator only sees these traits; concrete backends (Ollama,
//! Qdrant, the in-memory index, the file extractor) are picked at startup.

pub mod embedding;
pub mod extractor;
pub mod llm;
pub mod memory;
pub mod ollama;
pub mod qdrant;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use extractor::{DocumentExtractor, FileExtractor};
pub use llm::LlmProvider;
pub use memory::InMemoryVectorStore;
pub use ollama::{shared_providers, OllamaEmbedder, OllamaLlm};
pub use qdrant::QdrantVectorStore;
pub use vector_store::VectorStoreProvider;
