use anyhow::Result;
use helptoc_core::{Config, TocOptions, tree};
use tracing::warn;

use super::source;
use crate::cli::SearchArgs;
use crate::output::{OutputFormat, SearchPayload, TreePrinter, print_json};

/// Filter the tree by a query and print the surviving entries.
pub async fn execute(args: &SearchArgs, config: &Config) -> Result<()> {
    let mut options = TocOptions::from_config(config);
    // A single query has nothing to wait for.
    options.search.debounce_ms = 0;
    let mut toc = source::open(&args.source, config, options).await?;

    toc.set_search_query(args.query.as_str());
    toc.settle_search().await;

    let filtered = toc.state().filtered_items.is_some();
    if !filtered {
        warn!(
            "Query '{}' does not filter (search disabled or shorter than {} characters)",
            args.query,
            config.search.min_query_length
        );
    }
    let items = toc.display_items();
    let match_count = if filtered {
        tree::flatten(items)
            .into_iter()
            .filter(|item| item.matches(&args.query))
            .count()
    } else {
        0
    };

    match args.format {
        OutputFormat::Text => {
            if filtered && items.is_empty() {
                println!("No entries match '{}'", args.query);
            } else {
                TreePrinter::new(config.display.theme)
                    .highlight(&args.query)
                    .print(items);
            }
        },
        OutputFormat::Json => print_json(&SearchPayload {
            query: &args.query,
            filtered,
            match_count,
            items,
        })?,
    }
    Ok(())
}
