//! Serializable wire types for the vector index.
//!
//! The index is consumed over its REST contract, so these structs match its
//! expected JSON shapes exactly; no client SDK types leak into the rest of
//! the crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::article::{Article, Chunk};

/// One indexed record: identifier, vector, metadata payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    pub text: String,
    pub title: String,
    pub url: String,
    pub chunk_idx: usize,
}

impl Point {
    /// Combine a chunk and its vector with the parent article's metadata.
    /// Every call allocates a fresh identifier.
    pub fn from_chunk(chunk: &Chunk, vector: Vec<f32>, article: &Article) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vector,
            payload: PointPayload {
                text: chunk.text.clone(),
                title: article.title.clone(),
                url: article.link.clone(),
                chunk_idx: chunk.index,
            },
        }
    }
}

/// Body of a batch upsert call.
#[derive(Debug, Serialize)]
pub struct UpsertBody {
    pub points: Vec<Point>,
}

/// Body of a create-collection call.
#[derive(Debug, Serialize)]
pub struct CollectionBody {
    pub vectors: VectorParams,
}

#[derive(Debug, Serialize)]
pub struct VectorParams {
    pub size: usize,
    pub distance: String,
}

impl CollectionBody {
    pub fn cosine(size: usize) -> Self {
        Self {
            vectors: VectorParams {
                size,
                distance: "Cosine".to_string(),
            },
        }
    }
}
