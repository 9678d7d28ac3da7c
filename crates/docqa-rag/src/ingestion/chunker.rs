//! Fixed-size overlapping window chunking

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::TextChunk;

/// Text chunker with configurable window size and overlap
///
/// Sizes are counted in Unicode scalar values, so a window never splits a
/// multi-byte character.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Window size in characters
    window_size: usize,
    /// Characters shared by consecutive windows
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker; fails unless `0 <= overlap < window_size`
    pub fn new(window_size: usize, overlap: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::Config("chunk window size must be greater than 0".to_string()));
        }
        if overlap >= window_size {
            return Err(Error::Config(format!(
                "chunk overlap ({}) must be smaller than window size ({})",
                overlap, window_size
            )));
        }

        Ok(Self {
            window_size,
            overlap,
        })
    }

    /// Create from the chunking section of the config
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Window size in characters
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of consecutive windows
    pub fn step(&self) -> usize {
        self.window_size - self.overlap
    }

    /// Split text into dense, zero-indexed chunks
    pub fn split(&self, text: &str) -> Vec<TextChunk> {
        let clean = normalize_whitespace(text);

        self.windows(&clean)
            .into_iter()
            .filter(|window| !window.trim().is_empty())
            .enumerate()
            .map(|(index, window)| TextChunk::new(window, index))
            .collect()
    }

    /// Raw windows over already-normalized text
    fn windows<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // Byte offset of every char start, plus the end of the text
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let len = bounds.len() - 1;

        let mut windows = Vec::new();
        let mut start = 0usize;

        while start < len {
            let end = (start + self.window_size).min(len);
            windows.push(&text[bounds[start]..bounds[end]]);

            if start + self.window_size >= len {
                break;
            }
            start += self.step();
        }

        windows
    }
}

/// Collapse every whitespace run (newlines included) to one space and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
