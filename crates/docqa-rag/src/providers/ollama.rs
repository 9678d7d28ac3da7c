//! Ollama-based providers for embeddings and LLM
//!
//! Wraps `OllamaClient` to implement the provider traits.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::{Error, Result};
use crate::generation::{OllamaClient, PromptBuilder};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// Ollama embedding provider using nomic-embed-text or similar models
pub struct OllamaEmbedder {
    client: Arc<OllamaClient>,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    pub fn new(llm: &LlmConfig, embeddings: &EmbeddingConfig) -> Result<Self> {
        Ok(Self {
            client: Arc::new(OllamaClient::new(llm, embeddings)?),
            dimensions: embeddings.dimensions,
        })
    }

    /// Create from existing OllamaClient
    pub fn from_client(client: Arc<OllamaClient>, dimensions: usize) -> Self {
        Self { client, dimensions }
    }

    /// Every vector must match the dimension the index was created with
    fn check_dimensions(&self, vectors: &[Vec<f32>]) -> Result<()> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimensions) {
            return Err(Error::embedding(format!(
                "Model '{}' returned a {}-dimensional vector, expected {}",
                self.client.embed_model(),
                bad.len(),
                self.dimensions
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| Error::embedding("Ollama returned no embedding"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let vectors = self.client.embed_batch(texts).await?;

        if vectors.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Requested {} embeddings, received {}",
                texts.len(),
                vectors.len()
            )));
        }
        self.check_dimensions(&vectors)?;

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama LLM provider for answer generation
pub struct OllamaLlm {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider
    pub fn new(llm: &LlmConfig, embeddings: &EmbeddingConfig) -> Result<Self> {
        Ok(Self {
            client: Arc::new(OllamaClient::new(llm, embeddings)?),
            model: llm.generate_model.clone(),
        })
    }

    /// Create from existing OllamaClient
    pub fn from_client(client: Arc<OllamaClient>) -> Self {
        let model = client.generate_model().to_string();
        Self { client, model }
    }
}

#[async_trait]
impl LlmProvider for OllamaLlm {
    async fn generate(&self, system: &str, question: &str, context: &str) -> Result<String> {
        let prompt = PromptBuilder::build_rag_prompt(question, context);
        self.client.generate(system, &prompt).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Embedder and generator sharing one HTTP client
pub fn shared_providers(
    llm: &LlmConfig,
    embeddings: &EmbeddingConfig,
) -> Result<(OllamaEmbedder, OllamaLlm)> {
    let client = Arc::new(OllamaClient::new(llm, embeddings)?);
    Ok((
        OllamaEmbedder::from_client(Arc::clone(&client), embeddings.dimensions),
        OllamaLlm::from_client(client),
    ))
}
