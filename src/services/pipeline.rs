//! Top-level ingestion control: feeds → article refs → extracted text →
//! chunks → vectors → buffered points.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{info, warn};

use crate::error::{AppError, FeedError};
use crate::models::{Article, Config, Extraction, Point};
use crate::services::{Chunker, EmbeddingClient, UploadBatcher, VectorStoreClient};
use crate::sources::{ArticleExtractor, FeedReader};

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestStats {
    pub feeds_polled: u64,
    pub feeds_failed: u64,
    pub articles_seen: u64,
    pub articles_ingested: u64,
    pub articles_rejected: u64,
    pub chunks_embedded: u64,
    pub points_upserted: u64,
    pub points_dropped: u64,
    pub batches_flushed: u64,
    pub batches_failed: u64,
    pub duration_ms: u64,
}

/// The run's entire pipeline state: configured feeds, collaborator clients,
/// the chunker, and the single upload buffer. Constructed once per run and
/// consumed by it; nothing lives outside this object.
pub struct IngestPipeline {
    feeds: Vec<String>,
    max_articles: usize,
    dimension: usize,
    flush_pause: Duration,
    reader: FeedReader,
    extractor: ArticleExtractor,
    chunker: Chunker,
    embedder: EmbeddingClient,
    batcher: UploadBatcher,
    stats: IngestStats,
}

impl IngestPipeline {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Config)?;

        let fetch_client = Client::builder()
            .timeout(Duration::from_secs(config.ingest.fetch_timeout_secs))
            .build()
            .map_err(|e| AppError::Feed(FeedError::Fetch(e)))?;

        let store = VectorStoreClient::new(&config.vector_store)?;

        Ok(Self {
            feeds: config.ingest.feeds.clone(),
            max_articles: config.ingest.max_articles,
            dimension: config.embedding.dimension,
            flush_pause: Duration::from_millis(config.ingest.flush_pause_ms),
            reader: FeedReader::new(fetch_client.clone()),
            extractor: ArticleExtractor::new(fetch_client, config.ingest.min_words),
            chunker: Chunker::from_config(&config.ingest)?,
            embedder: EmbeddingClient::new(&config.embedding)?,
            batcher: UploadBatcher::new(store, config.ingest.batch_size),
            stats: IngestStats::default(),
        })
    }

    /// Drive one full run over all configured feeds. Individual feed,
    /// article, and flush failures are logged and skipped; the run always
    /// proceeds to the end and reports what happened.
    pub async fn run(mut self) -> IngestStats {
        let start = Instant::now();

        // Downstream upserts surface the real problem if the collection is
        // genuinely unusable, so this is not fatal.
        if let Err(e) = self.batcher.store().ensure_collection(self.dimension).await {
            warn!(error = %e, "collection init failed, continuing");
        } else {
            info!(
                collection = self.batcher.store().collection(),
                dimension = self.dimension,
                "collection ensured"
            );
        }

        let feeds = std::mem::take(&mut self.feeds);
        for feed in &feeds {
            info!(feed = %feed, "polling feed");
            let refs = match self.reader.fetch(feed, self.max_articles).await {
                Ok(refs) => refs,
                Err(e) => {
                    warn!(feed = %feed, error = %e, "failed to read feed");
                    self.stats.feeds_failed += 1;
                    continue;
                }
            };
            self.stats.feeds_polled += 1;

            for article_ref in refs {
                self.stats.articles_seen += 1;
                match self.extractor.extract(&article_ref).await {
                    Extraction::Extracted(article) => self.ingest_article(article).await,
                    Extraction::Rejected(reason) => {
                        warn!(link = %article_ref.link, %reason, "skipping article");
                        self.stats.articles_rejected += 1;
                    }
                }
            }
        }

        self.batcher.finish().await;

        let batch = self.batcher.stats();
        self.stats.points_upserted = batch.points_upserted;
        self.stats.points_dropped = batch.points_dropped;
        self.stats.batches_flushed = batch.batches_flushed;
        self.stats.batches_failed = batch.batches_failed;
        self.stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            points = self.stats.points_upserted,
            batches = self.stats.batches_flushed,
            articles = self.stats.articles_ingested,
            rejected = self.stats.articles_rejected,
            "run complete"
        );
        self.stats
    }

    /// Chunk one valid article, embed all its chunks in a single batch
    /// call, and buffer the resulting points. An embedding failure rejects
    /// only this article.
    async fn ingest_article(&mut self, article: Article) {
        let chunks = self.chunker.chunk(&article.text);
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();

        let vectors = match self.embedder.embed_batch(&texts).await {
            Ok(vectors) => vectors,
            Err(e) => {
                warn!(link = %article.link, error = %e, "embedding failed, skipping article");
                self.stats.articles_rejected += 1;
                return;
            }
        };

        self.stats.chunks_embedded += chunks.len() as u64;
        self.stats.articles_ingested += 1;

        for (chunk, vector) in chunks.iter().zip(vectors) {
            let flushed = self
                .batcher
                .push(Point::from_chunk(chunk, vector, &article))
                .await;
            if let Some(report) = flushed
                && report.ok
                && !self.flush_pause.is_zero()
            {
                tokio::time::sleep(self.flush_pause).await;
            }
        }
    }
}
