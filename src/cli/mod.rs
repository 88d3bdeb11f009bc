//! Command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};

/// Feed-to-vector ingestion pipeline.
#[derive(Debug, Parser)]
#[command(name = "newsvec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Poll the configured feeds and ingest articles into the vector index
    Ingest(commands::IngestArgs),

    /// Run the embedding HTTP service
    Serve(commands::ServeArgs),

    /// Check infrastructure status (embedding service, vector index)
    Status,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}
