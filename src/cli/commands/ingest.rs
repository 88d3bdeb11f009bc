//! Ingest command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::ProgressBar;

use crate::models::Config;
use crate::services::{IngestPipeline, IngestStats};

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Additional feed URLs to poll besides the configured ones
    #[arg(long, short = 'F', value_name = "URL")]
    pub feed: Vec<String>,

    /// Maximum articles taken per feed
    #[arg(long)]
    pub max_articles: Option<usize>,

    /// Vector index base URL
    #[arg(long, env = "QDRANT_URL")]
    pub index_url: Option<String>,

    /// Index collection name
    #[arg(long, env = "QDRANT_COLLECTION")]
    pub collection: Option<String>,

    /// Embedding service base URL
    #[arg(long, env = "EMBED_URL")]
    pub embed_url: Option<String>,

    /// List the feeds that would be polled without ingesting
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle_ingest(args: IngestArgs, verbose: bool) -> Result<()> {
    let mut config = Config::load().context("failed to load configuration")?;

    config.ingest.feeds.extend(args.feed);
    if let Some(max_articles) = args.max_articles {
        config.ingest.max_articles = max_articles;
    }
    if let Some(url) = args.index_url {
        config.vector_store.url = url;
    }
    if let Some(collection) = args.collection {
        config.vector_store.collection = collection;
    }
    if let Some(url) = args.embed_url {
        config.embedding.url = url;
    }
    config.validate()?;

    if config.ingest.feeds.is_empty() {
        anyhow::bail!("no feeds configured; add [ingest].feeds or pass --feed");
    }

    if args.dry_run {
        println!("Would poll {} feed(s):", config.ingest.feeds.len());
        for feed in &config.ingest.feeds {
            println!("  {feed}");
        }
        return Ok(());
    }

    let pipeline = IngestPipeline::new(&config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Ingesting {} feed(s)...", config.ingest.feeds.len()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let stats = pipeline.run().await;
    spinner.finish_and_clear();

    print_stats(&stats, verbose);
    Ok(())
}

fn print_stats(stats: &IngestStats, verbose: bool) {
    println!(
        "Ingested {} points in {} batches from {} article(s) across {} feed(s) ({:.1}s)",
        stats.points_upserted,
        stats.batches_flushed,
        stats.articles_ingested,
        stats.feeds_polled,
        stats.duration_ms as f64 / 1000.0
    );

    if stats.articles_rejected > 0 {
        println!("Skipped {} article(s)", stats.articles_rejected);
    }
    if stats.feeds_failed > 0 {
        println!("Failed to read {} feed(s)", stats.feeds_failed);
    }
    if stats.batches_failed > 0 {
        println!(
            "Dropped {} batch(es) ({} points) on failed upserts",
            stats.batches_failed, stats.points_dropped
        );
    }
    if verbose {
        println!(
            "Articles seen: {}, chunks embedded: {}",
            stats.articles_seen, stats.chunks_embedded
        );
    }
}
