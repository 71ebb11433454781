//! helptoc CLI - Browse and search documentation tables of contents
//!
//! This is the main entry point for the helptoc command-line interface.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use helptoc_core::Config;
use tracing::debug;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Convert Broken pipe panics into a clean exit
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe") || msg.contains("broken pipe") {
            std::process::exit(0);
        }
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    debug!(path = %config_path.display(), "using configuration");

    execute_command(cli.command, &config_path).await
}

async fn execute_command(command: Commands, config_path: &Path) -> Result<()> {
    match command {
        Commands::Show(args) => commands::show(&args, &load_config(config_path)?).await,
        Commands::Search(args) => commands::search(&args, &load_config(config_path)?).await,
        Commands::Path(args) => commands::path(&args, &load_config(config_path)?).await,
        Commands::Config { command } => commands::config(&command, config_path),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load_from(path)
        .with_context(|| format!("Failed to load config from '{}'", path.display()))
}
