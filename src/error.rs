//! Error types for the feed ingestion pipeline.

use thiserror::Error;

/// Errors related to configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    Path(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Errors related to fetching and parsing feeds.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to fetch feed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to parse feed: {0}")]
    Parse(#[from] rss::Error),
}

/// Errors related to embedding requests.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to connect to embedding service: {0}")]
    Connection(String),

    #[error("embedding service error (status {status}): {body}")]
    Server { status: u16, body: String },

    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("embedding timeout")]
    Timeout,
}

/// Errors related to the vector index.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("failed to connect to vector index: {0}")]
    Connection(String),

    #[error("collection create rejected (status {status}): {body}")]
    Collection { status: u16, body: String },

    #[error("upsert rejected (status {status}): {body}")]
    Upsert { status: u16, body: String },

    #[error("vector index request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Errors related to the embedding-serving wrapper.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("unknown embedding model: {0}")]
    UnknownModel(String),

    #[error("failed to load embedding model: {0}")]
    ModelLoad(String),

    #[error("embedding failed: {0}")]
    Embed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-level errors that wrap domain errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector store error: {0}")]
    VectorStore(#[from] VectorStoreError),

    #[error("serve error: {0}")]
    Serve(#[from] ServeError),
}
