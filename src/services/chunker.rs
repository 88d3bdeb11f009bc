//! Overlapping word-window chunking.

use crate::error::ConfigError;
use crate::models::{Chunk, IngestConfig};

/// Splits article text into overlapping word windows sized for embedding.
#[derive(Debug, Clone)]
pub struct Chunker {
    max_words: usize,
    overlap: usize,
}

impl Chunker {
    /// Window parameters must satisfy `max_words > overlap > 0`; any other
    /// combination would never advance the window.
    pub fn new(max_words: usize, overlap: usize) -> Result<Self, ConfigError> {
        if overlap == 0 || max_words <= overlap {
            return Err(ConfigError::Validation(format!(
                "chunk window must satisfy max_words > overlap > 0 (got max_words={max_words}, overlap={overlap})"
            )));
        }
        Ok(Self { max_words, overlap })
    }

    pub fn from_config(config: &IngestConfig) -> Result<Self, ConfigError> {
        Self::new(config.max_words, config.overlap)
    }

    /// Window the text. Chunk `k` starts at word `k * (max_words - overlap)`
    /// and spans up to `max_words` words; the sequence ends with the window
    /// that reaches the last word, which may be shorter than the rest.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let step = self.max_words - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.max_words).min(words.len());
            chunks.push(Chunk {
                text: words[start..end].join(" "),
                index: chunks.len(),
            });
            if end == words.len() {
                break;
            }
            start += step;
        }
        chunks
    }
}
