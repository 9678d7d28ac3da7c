//! Ollama HTTP client for embeddings and answer generation with retry logic

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::{Error, Result};

/// Ollama API client with automatic retry
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Generation settings
    config: LlmConfig,
    /// Embedding model name
    embed_model: String,
    /// Maximum retries
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaClient {
    /// Create a new Ollama client with retry support
    pub fn new(config: &LlmConfig, embeddings: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            embed_model: embeddings.model.clone(),
            config: config.clone(),
        })
    }

    /// Generation model in use
    pub fn generate_model(&self) -> &str {
        &self.config.generate_model
    }

    /// Embedding model in use
    pub fn embed_model(&self) -> &str {
        &self.embed_model
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Ollama request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::llm("Unknown error")))
    }

    /// Check if Ollama is available
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Embed several texts in one `/api/embed` call
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.config.base_url);
        let url = url.as_str();

        self.retry_request(|| async move {
            let request = EmbedRequest {
                model: &self.embed_model,
                input: texts,
            };

            let response = self
                .client
                .post(url)
                .json(&request)
                .send()
                .await
                .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::embedding(format!(
                    "Embedding failed: HTTP {} - {}",
                    status, body
                )));
            }

            let embed_response: EmbedResponse = response.json().await.map_err(|e| {
                Error::embedding(format!("Failed to parse embedding response: {}", e))
            })?;

            Ok(embed_response.embeddings)
        })
        .await
    }

    /// Generate a completion for `prompt` under the `system` instruction
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let url = url.as_str();

        tracing::info!("Generating answer with model: {}", self.config.generate_model);

        self.retry_request(|| async move {
            let request = GenerateRequest {
                model: &self.config.generate_model,
                system,
                prompt,
                stream: false,
                options: GenerateOptions {
                    temperature: self.config.temperature,
                    top_p: self.config.top_p,
                    repeat_penalty: self.config.repeat_penalty,
                    num_predict: self.config.max_new_tokens,
                },
            };

            let response = self
                .client
                .post(url)
                .json(&request)
                .send()
                .await
                .map_err(|e| Error::llm(format!("Generation request failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::llm(format!(
                    "Generation failed: HTTP {} - {}",
                    status, body
                )));
            }

            let generate_response: GenerateResponse = response.json().await.map_err(|e| {
                Error::llm(format!("Failed to parse generation response: {}", e))
            })?;

            Ok(generate_response.response.trim().to_string())
        })
        .await
    }
}
