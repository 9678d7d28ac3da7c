//! docqa-rag: question answering over uploaded documents
//!
//! Documents are extracted to text, split into overlapping character
//! windows, embedded with an Ollama model and stored in a vector index
//! (in-process or Qdrant). Questions are answered by retrieving the most
//! similar chunks and asking a generation model to answer from them only.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod rag;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use rag::RagOrchestrator;
pub use types::{
    query::ChatRequest,
    response::{ChatOutcome, ChunkPage, IndexOutcome, RetrievalResult},
};
