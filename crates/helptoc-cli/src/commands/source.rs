use anyhow::{Context, Result};
use helptoc_core::{Config, Fetcher, HelpToc, HttpSource, TableOfContents, TocOptions};
use tracing::debug;

use crate::cli::SourceArgs;

/// Build a table of contents over the selected dataset and load it.
///
/// `--file` is read in-process; `--url` and the configured URL are fetched.
pub async fn open(
    source: &SourceArgs,
    config: &Config,
    options: TocOptions,
) -> Result<TableOfContents> {
    let mut toc = if let Some(path) = &source.file {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read dataset '{}'", path.display()))?;
        let data = HelpToc::from_slice(&bytes)
            .with_context(|| format!("Failed to parse dataset '{}'", path.display()))?;
        TableOfContents::new(TocOptions {
            data: Some(data),
            ..options
        })
    } else if let Some(url) = &source.url {
        let fetcher = Fetcher::with_timeout(config.loader.timeout())?;
        TableOfContents::with_source(options, HttpSource::new(fetcher, url.clone()))
    } else {
        let http = HttpSource::from_config(&config.loader)?;
        debug!(url = %http.url(), "using configured dataset URL");
        TableOfContents::with_source(options, http)
    };

    toc.load().await.context("Failed to load table of contents")?;
    Ok(toc)
}
