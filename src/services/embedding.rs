//! HTTP client for the embedding service.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;
use crate::models::EmbeddingConfig;

#[derive(Debug, Serialize)]
struct EmbedTextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct EmbedTextsRequest<'a> {
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedTextResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbedTextsResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Client for the embedding service.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: Client,
    base_url: String,
}

impl EmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Embed a batch of texts in one call. The response vectors come back
    /// in input order, so vector `i` belongs to text `i`.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response = self.post_embed(&EmbedTextsRequest { texts }).await?;
        let parsed: EmbedTextsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }
        Ok(parsed.embeddings)
    }

    /// Embed a single text.
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self.post_embed(&EmbedTextRequest { text }).await?;
        let parsed: EmbedTextResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
        Ok(parsed.embedding)
    }

    /// Check that the embedding service is reachable and ready.
    pub async fn health_check(&self) -> Result<(), EmbeddingError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EmbeddingError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EmbeddingError::Server {
                status: response.status().as_u16(),
                body: "health check failed".to_string(),
            });
        }
        Ok(())
    }

    async fn post_embed<B: Serialize>(&self, body: &B) -> Result<reqwest::Response, EmbeddingError> {
        let url = format!("{}/embed", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout
                } else {
                    EmbeddingError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Server { status, body });
        }
        Ok(response)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
