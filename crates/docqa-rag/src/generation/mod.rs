//! Answer generation: Ollama client and prompt templates

mod ollama;
pub mod prompt;

pub use ollama::OllamaClient;
pub use prompt::{PromptBuilder, INSUFFICIENT_INFORMATION, SYSTEM_PROMPT};
