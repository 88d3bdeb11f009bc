//! Config command implementation.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::models::Config;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write the default configuration file")]
    Init {
        #[arg(long, short = 'f', help = "Force overwrite existing config")]
        force: bool,
    },

    #[command(about = "Show the resolved configuration")]
    Show,

    #[command(about = "Show the configuration file path")]
    Path,
}

pub async fn handle_config(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Init { force } => {
            let path = config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }
            Config::default()
                .save()
                .context("failed to write config")?;
            println!("Created config at: {}", path.display());
        }
        ConfigCommand::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::Path => {
            println!("{}", config_path()?.display());
        }
    }
    Ok(())
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().ok_or_else(|| anyhow::anyhow!("could not determine config directory"))
}
