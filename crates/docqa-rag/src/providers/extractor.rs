//! Document extractor trait and the filesystem implementation

use async_trait::async_trait;
use std::path::Path;

use crate::error::{Error, Result};
use crate::ingestion::FileParser;

/// Turns a file on disk into plain text
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract the text of the file at `path`
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Reads files from disk and parses them off the async runtime
#[derive(Debug, Clone, Default)]
pub struct FileExtractor;

impl FileExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for FileExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| Error::extraction(&filename, format!("Cannot read file: {}", e)))?;

        // PDF parsing is CPU bound
        tokio::task::spawn_blocking(move || FileParser::extract_text(&filename, &data))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }
}
