//! Request and response bodies of the embedding service.

use serde::{Deserialize, Serialize};

/// Body of `POST /embed`. Callers send exactly one of the two fields; when
/// both are present the single `text` form wins.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub texts: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EmbedResponse {
    Single { embedding: Vec<f32> },
    Batch { embeddings: Vec<Vec<f32>> },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub dimensions: usize,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_accepts_either_field() {
        let single: EmbedRequest = serde_json::from_value(json!({"text": "hi"})).unwrap();
        assert_eq!(single.text.as_deref(), Some("hi"));
        assert!(single.texts.is_none());

        let batch: EmbedRequest = serde_json::from_value(json!({"texts": ["a", "b"]})).unwrap();
        assert_eq!(batch.texts.unwrap().len(), 2);

        let neither: EmbedRequest = serde_json::from_value(json!({})).unwrap();
        assert!(neither.text.is_none() && neither.texts.is_none());
    }

    #[test]
    fn test_response_wire_shapes() {
        let single = EmbedResponse::Single {
            embedding: vec![0.5],
        };
        assert_eq!(
            serde_json::to_value(single).unwrap(),
            json!({"embedding": [0.5]})
        );

        let batch = EmbedResponse::Batch {
            embeddings: vec![vec![1.0], vec![2.0]],
        };
        assert_eq!(
            serde_json::to_value(batch).unwrap(),
            json!({"embeddings": [[1.0], [2.0]]})
        );
    }
}
