//! LLM provider trait for generating answers

use async_trait::async_trait;
use crate::error::Result;

/// Trait for LLM-based answer generation
///
/// Implementations:
/// - `OllamaLlm`: Local Ollama server (qwen2.5, llama3, phi3, ...)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Answer `question` from `context` following the `system` instruction
    async fn generate(&self, system: &str, question: &str, context: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
