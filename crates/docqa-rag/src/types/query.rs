//! Request types

use serde::{Deserialize, Serialize};

use crate::config::{MAX_TOP_K, MIN_TOP_K};
use crate::error::{Error, Result};

/// Chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve (server default when omitted)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl ChatRequest {
    /// Resolve `top_k` against the server default and check bounds
    pub fn validate(&self, default_top_k: usize) -> Result<usize> {
        check_question(&self.question)?;

        let top_k = self.top_k.unwrap_or(default_top_k);
        check_top_k(top_k)?;
        Ok(top_k)
    }
}

/// A question must contain at least one non-whitespace character
pub fn check_question(question: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(Error::validation("question must not be blank"));
    }
    Ok(())
}

/// Bounds check shared by the HTTP layer and the orchestrator
pub fn check_top_k(top_k: usize) -> Result<()> {
    if !(MIN_TOP_K..=MAX_TOP_K).contains(&top_k) {
        return Err(Error::validation(format!(
            "top_k must be between {} and {}, got {}",
            MIN_TOP_K, MAX_TOP_K, top_k
        )));
    }
    Ok(())
}

/// Query string of the chunk browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunksQuery {
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Entries to skip
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

impl Default for ChunksQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}
