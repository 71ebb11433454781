use anyhow::{Result, bail};
use helptoc_core::{Config, TocItem, TocOptions, tree};

use super::source;
use crate::cli::PathArgs;
use crate::output::{OutputFormat, PathEntry, print_json};

/// Print the chain of entries from the top level down to `args.id`.
pub async fn execute(args: &PathArgs, config: &Config) -> Result<()> {
    let toc = source::open(&args.source, config, TocOptions::from_config(config)).await?;
    let items = &toc.state().items;

    let Some(target) = tree::find_by_id(items, &args.id) else {
        bail!("No entry with id '{}'", args.id);
    };
    let ancestors = tree::ancestor_ids(items, &args.id);
    let mut chain: Vec<&TocItem> = ancestors
        .iter()
        .filter_map(|id| tree::find_by_id(items, id))
        .collect();
    chain.push(target);

    match args.format {
        OutputFormat::Text => {
            let titles: Vec<&str> = chain.iter().map(|item| item.title.as_str()).collect();
            println!("{}", titles.join(" › "));
        },
        OutputFormat::Json => {
            let entries: Vec<PathEntry<'_>> = chain.into_iter().map(PathEntry::from).collect();
            print_json(&entries)?;
        },
    }
    Ok(())
}
