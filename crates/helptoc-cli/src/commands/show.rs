use anyhow::Result;
use helptoc_core::{Config, TocOptions};
use tracing::warn;

use super::source;
use crate::cli::ShowArgs;
use crate::output::{OutputFormat, TreePrinter, print_json};

/// Print the tree, optionally with an entry activated or everything expanded.
pub async fn execute(args: &ShowArgs, config: &Config) -> Result<()> {
    let options = TocOptions {
        initial_active_id: args.active.clone(),
        ..TocOptions::from_config(config)
    };
    let mut toc = source::open(&args.source, config, options).await?;

    if let Some(id) = &args.active {
        if toc.state().active_item_id.is_none() {
            warn!("No entry with id '{id}'");
        }
    }
    if args.expand_all {
        toc.expand_all();
    }

    match args.format {
        OutputFormat::Text => TreePrinter::new(config.display.theme).print(toc.display_items()),
        OutputFormat::Json => print_json(toc.state())?,
    }
    Ok(())
}
