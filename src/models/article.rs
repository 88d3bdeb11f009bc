use thiserror::Error;

use crate::utils::word_count;

/// One entry discovered in a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    pub link: String,
    pub title: String,
}

/// Full text of one extracted article. Only built for documents that passed
/// the minimum-length filter.
#[derive(Debug, Clone)]
pub struct Article {
    pub text: String,
    pub title: String,
    pub link: String,
}

impl Article {
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// A bounded, overlapping window of an article's text, sized for embedding.
/// `index` is the 0-based position of the window within its article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
}

/// Outcome of the extraction step for a single article. Rejections are
/// ordinary data inspected by the driver, never a run-stopping error.
#[derive(Debug)]
pub enum Extraction {
    Extracted(Article),
    Rejected(RejectReason),
}

/// Why an article was dropped before chunking.
#[derive(Debug, Error)]
pub enum RejectReason {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("empty article body")]
    Empty,

    #[error("article too short: {words} words (minimum {min})")]
    TooShort { words: usize, min: usize },
}
