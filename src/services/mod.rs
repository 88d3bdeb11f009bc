mod batcher;
mod chunker;
mod embedding;
mod pipeline;
mod vector_store;

pub use batcher::{BatchStats, FlushReport, UploadBatcher};
pub use chunker::Chunker;
pub use embedding::EmbeddingClient;
pub use pipeline::{IngestPipeline, IngestStats};
pub use vector_store::VectorStoreClient;
