//! Configuration for the document Q&A service
//!
//! Every component receives its section of [`RagConfig`] through its
//! constructor, so several orchestrators with different settings can live in
//! one process.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming a TOML config file
pub const CONFIG_ENV_VAR: &str = "DOCQA_CONFIG";

/// Smallest accepted `top_k` for a chat request
pub const MIN_TOP_K: usize = 1;

/// Largest accepted `top_k` for a chat request
pub const MAX_TOP_K: usize = 20;

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
    /// Vector index configuration
    pub vector_db: VectorDbConfig,
    /// Upload handling
    pub upload: UploadConfig,
}

impl RagConfig {
    /// Read a TOML config file; missing sections fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Load from an explicit path, else `$DOCQA_CONFIG`, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(env_path) => Self::from_file(PathBuf::from(env_path))?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never work at request time
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;

        if self.embeddings.dimensions == 0 {
            return Err(Error::Config("embeddings.dimensions must be > 0".to_string()));
        }

        if !(MIN_TOP_K..=MAX_TOP_K).contains(&self.server.default_top_k) {
            return Err(Error::Config(format!(
                "server.default_top_k must be within {}..={}, got {}",
                MIN_TOP_K, MAX_TOP_K, self.server.default_top_k
            )));
        }

        if self.vector_db.collection.trim().is_empty() {
            return Err(Error::Config("vector_db.collection must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
    /// `top_k` used when a chat request omits it
    pub default_top_k: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
            default_top_k: 5,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
    /// Characters shared by consecutive windows
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    /// `chunk_size > 0` and `chunk_overlap < chunk_size`
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than 0".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Ollama embedding model
    pub model: String,
    /// Vector length, shared with the vector index schema
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Penalty for repeated tokens
    pub repeat_penalty: f32,
    /// Upper bound on generated tokens
    pub max_new_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Transport retries inside the HTTP client
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            generate_model: "qwen2.5:1.5b-instruct".to_string(),
            temperature: 0.3,
            top_p: 0.9,
            repeat_penalty: 1.2,
            max_new_tokens: 512,
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Vector index backend selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VectorBackend {
    /// Process-local index, lost on restart
    #[default]
    Memory,
    /// Qdrant over its REST API
    Qdrant,
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorDbConfig {
    /// Which index implementation to use
    pub backend: VectorBackend,
    /// Qdrant base URL
    pub url: String,
    /// Collection name
    pub collection: String,
    /// Optional Qdrant API key
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            backend: VectorBackend::Memory,
            url: "http://localhost:6333".to_string(),
            collection: "documents".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Upload handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Where uploaded files wait while they are indexed
    pub dir: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("docqa")
                .join("uploads"),
        }
    }
}
