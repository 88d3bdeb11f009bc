mod article;
mod config;
mod point;

pub use article::{Article, ArticleRef, Chunk, Extraction, RejectReason};
pub use config::{
    Config, DEFAULT_COLLECTION, DEFAULT_EMBED_URL, DEFAULT_INDEX_URL, DEFAULT_MODEL,
    EmbeddingConfig, IngestConfig, ServerConfig, VectorStoreConfig,
};
pub use point::{CollectionBody, Point, PointPayload, UpsertBody, VectorParams};
