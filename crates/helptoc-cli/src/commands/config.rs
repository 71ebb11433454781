use std::path::Path;

use anyhow::{Context, Result};
use helptoc_core::Config;

use crate::cli::ConfigCommands;

pub fn execute(command: &ConfigCommands, path: &Path) -> Result<()> {
    let mut config = Config::load_from(path)
        .with_context(|| format!("Failed to load config from '{}'", path.display()))?;

    match command {
        ConfigCommands::Show => {
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        },
        ConfigCommands::Theme { value } => {
            config.display.theme = *value;
            config.save_to(path)?;
            println!("Theme set to {value}");
        },
    }
    Ok(())
}
