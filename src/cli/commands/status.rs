//! Status command: probe the embedding service and the vector index.

use anyhow::Result;

use crate::models::Config;
use crate::services::{EmbeddingClient, VectorStoreClient};

pub async fn handle_status(_verbose: bool) -> Result<()> {
    let config = Config::load()?;

    let embedding_up = match EmbeddingClient::new(&config.embedding) {
        Ok(client) => client.health_check().await.is_ok(),
        Err(_) => false,
    };
    let index_up = match VectorStoreClient::new(&config.vector_store) {
        Ok(client) => client.health_check().await.is_ok(),
        Err(_) => false,
    };

    println!(
        "Embedding service ({}): {}",
        config.embedding.url,
        if embedding_up { "up" } else { "down" }
    );
    println!(
        "Vector index ({}): {}",
        config.vector_store.url,
        if index_up { "up" } else { "down" }
    );
    println!("Collection: {}", config.vector_store.collection);

    if !embedding_up {
        eprintln!();
        eprintln!("Hint: start the embedding service with: newsvec serve");
    }
    if !index_up {
        eprintln!("Warning: vector index not reachable. Start with: docker run -p 6333:6333 qdrant/qdrant");
    }

    if embedding_up && index_up {
        Ok(())
    } else {
        anyhow::bail!("infrastructure not fully available")
    }
}
