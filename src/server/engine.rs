//! Embedding engines behind the serving wrapper.

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::ServeError;

/// Anything that turns texts into fixed-dimension vectors.
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;

    fn model_id(&self) -> &str;

    /// Embed a batch, returning one vector per input text in input order.
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, ServeError>;
}

/// fastembed-backed engine running the model in-process. Model files are
/// downloaded on first load and cached.
pub struct FastembedEngine {
    model: TextEmbedding,
    model_id: String,
    dimension: usize,
}

impl FastembedEngine {
    pub fn load(model_id: &str) -> Result<Self, ServeError> {
        let kind = resolve_model(model_id)?;
        let dimension = TextEmbedding::get_model_info(&kind)
            .map_err(|e| ServeError::ModelLoad(e.to_string()))?
            .dim;
        let model = TextEmbedding::try_new(InitOptions::new(kind))
            .map_err(|e| ServeError::ModelLoad(e.to_string()))?;

        Ok(Self {
            model,
            model_id: model_id.to_string(),
            dimension,
        })
    }
}

impl Embedder for FastembedEngine {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, ServeError> {
        self.model
            .embed(texts, None)
            .map_err(|e| ServeError::Embed(e.to_string()))
    }
}

fn resolve_model(model_id: &str) -> Result<EmbeddingModel, ServeError> {
    match model_id {
        "all-MiniLM-L6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "all-MiniLM-L12-v2" => Ok(EmbeddingModel::AllMiniLML12V2),
        "bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
        "multilingual-e5-small" => Ok(EmbeddingModel::MultilingualE5Small),
        other => Err(ServeError::UnknownModel(other.to_string())),
    }
}
