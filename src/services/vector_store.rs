//! REST client for the vector index.

use std::time::Duration;

use reqwest::Client;

use crate::error::VectorStoreError;
use crate::models::{CollectionBody, Point, UpsertBody, VectorStoreConfig};

/// Error bodies are truncated to this many characters in logs and errors.
const MAX_ERROR_BODY: usize = 400;

pub struct VectorStoreClient {
    client: Client,
    base_url: String,
    collection: String,
}

impl VectorStoreClient {
    pub fn new(config: &VectorStoreConfig) -> Result<Self, VectorStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorStoreError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        })
    }

    /// Idempotently create the collection with the given vector dimension
    /// and cosine distance. The index accepts re-creation with the same
    /// configuration as a no-op.
    pub async fn ensure_collection(&self, dimension: usize) -> Result<(), VectorStoreError> {
        let url = format!("{}/collections/{}", self.base_url, self.collection);
        let response = self
            .client
            .put(&url)
            .json(&CollectionBody::cosine(dimension))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = truncate_body(&response.text().await.unwrap_or_default());
            return Err(VectorStoreError::Collection { status, body });
        }
        Ok(())
    }

    /// Submit one batch as a single upsert call, waiting for the index to
    /// acknowledge before returning.
    pub async fn upsert(&self, points: Vec<Point>) -> Result<(), VectorStoreError> {
        if points.is_empty() {
            return Ok(());
        }

        let url = format!(
            "{}/collections/{}/points?wait=true",
            self.base_url, self.collection
        );
        let response = self.client.put(&url).json(&UpsertBody { points }).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = truncate_body(&response.text().await.unwrap_or_default());
            return Err(VectorStoreError::Upsert { status, body });
        }
        Ok(())
    }

    /// Check that the index is reachable.
    pub async fn health_check(&self) -> Result<(), VectorStoreError> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| VectorStoreError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VectorStoreError::Connection(format!(
                "index returned status {}",
                response.status()
            )));
        }
        Ok(())
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY {
        body.to_string()
    } else {
        body.chars().take(MAX_ERROR_BODY).collect()
    }
}
