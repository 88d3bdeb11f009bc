use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_EMBED_URL: &str = "http://localhost:5000";
pub const DEFAULT_INDEX_URL: &str = "http://localhost:6333";
pub const DEFAULT_COLLECTION: &str = "news_passages";
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub vector_store: VectorStoreConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join("newsvec").join("config.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or_else(|| {
            ConfigError::Path("could not determine config directory".to_string())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Reject configurations the pipeline could never make progress with.
    /// A window that does not advance would loop forever, so this runs
    /// before any network call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ingest.overlap == 0 || self.ingest.max_words <= self.ingest.overlap {
            return Err(ConfigError::Validation(format!(
                "chunk window must satisfy max_words > overlap > 0 (got max_words={}, overlap={})",
                self.ingest.max_words, self.ingest.overlap
            )));
        }
        if self.ingest.batch_size == 0 {
            return Err(ConfigError::Validation(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.embedding.dimension == 0 {
            return Err(ConfigError::Validation(
                "embedding dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embed_url")]
    pub url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Vector dimension the collection is created with. Must match what the
    /// embedding service actually produces for the whole run.
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    #[serde(default = "default_embed_timeout")]
    pub timeout_secs: u64,
}

fn default_embed_url() -> String {
    DEFAULT_EMBED_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_dimension() -> usize {
    384
}

fn default_embed_timeout() -> u64 {
    60
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: default_embed_url(),
            model: default_model(),
            dimension: default_dimension(),
            timeout_secs: default_embed_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    #[serde(default = "default_index_url")]
    pub url: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_index_timeout")]
    pub timeout_secs: u64,
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_index_timeout() -> u64 {
    30
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            collection: default_collection(),
            timeout_secs: default_index_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_feeds")]
    pub feeds: Vec<String>,

    /// Entries taken from the head of each feed.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,

    /// Articles below this word count are discarded before chunking.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    #[serde(default = "default_max_words")]
    pub max_words: usize,

    #[serde(default = "default_overlap")]
    pub overlap: usize,

    /// Points buffered before a batch is upserted.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause after each successful in-run flush, throttling toward the
    /// index and the embedding service.
    #[serde(default = "default_flush_pause_ms")]
    pub flush_pause_ms: u64,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_feeds() -> Vec<String> {
    vec![
        "http://feeds.reuters.com/reuters/topNews".to_string(),
        "http://feeds.bbci.co.uk/news/rss.xml".to_string(),
        "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml".to_string(),
    ]
}

fn default_max_articles() -> usize {
    30
}

fn default_min_words() -> usize {
    50
}

fn default_max_words() -> usize {
    200
}

fn default_overlap() -> usize {
    40
}

fn default_batch_size() -> usize {
    64
}

fn default_flush_pause_ms() -> u64 {
    500
}

fn default_fetch_timeout() -> u64 {
    20
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            max_articles: default_max_articles(),
            min_words: default_min_words(),
            max_words: default_max_words(),
            overlap: default_overlap(),
            batch_size: default_batch_size(),
            flush_pause_ms: default_flush_pause_ms(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}
