//! Error types for the document Q&A service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG system errors
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration (chunk window/overlap, dimensions, addresses)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The extraction collaborator could not produce text
    #[error("Failed to parse file '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Unsupported file type
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Chunking produced nothing worth indexing
    #[error("Document '{0}' contains no indexable text")]
    EmptyDocument(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector index unreachable or rejected the operation
    #[error("Vector storage error: {0}")]
    Storage(String),

    /// Generation model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Any failure on the query path, with the underlying cause attached
    #[error("Chat failed: {0}")]
    Chat(#[source] Box<Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Wrap a query-path failure
    pub fn chat(cause: Error) -> Self {
        match cause {
            Error::Chat(_) => cause,
            other => Self::Chat(Box::new(other)),
        }
    }

    /// Status code and machine-readable type used in HTTP responses
    pub fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Error::Extraction { .. } => (StatusCode::BAD_REQUEST, "parse_error"),
            Error::UnsupportedFileType(_) => (StatusCode::BAD_REQUEST, "unsupported_type"),
            Error::EmptyDocument(_) => (StatusCode::BAD_REQUEST, "empty_document"),
            Error::Embedding(_) => (StatusCode::INTERNAL_SERVER_ERROR, "embedding_error"),
            Error::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            Error::Llm(_) => (StatusCode::SERVICE_UNAVAILABLE, "llm_error"),
            Error::Chat(_) => (StatusCode::INTERNAL_SERVER_ERROR, "chat_error"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
