//! Serve command: run the embedding HTTP service.

use anyhow::Result;
use clap::Args;

use crate::models::Config;
use crate::server;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// Embedding model identifier
    #[arg(long, env = "EMBED_MODEL")]
    pub model: Option<String>,
}

pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(model) = args.model {
        config.embedding.model = model;
    }

    server::run_server(&config).await?;
    Ok(())
}
