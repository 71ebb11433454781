use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::LoaderConfig;
use crate::types::HelpToc;
use crate::{Error, Result};

/// Something that can produce a raw table-of-contents dataset on demand.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Acquire the dataset.
    async fn fetch_dataset(&self) -> Result<HelpToc>;
}

/// HTTP client for fetching table-of-contents datasets
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with a 30 second timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a new fetcher with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("helptoc/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Fetches and deserializes a dataset from `url`
    pub async fn fetch_dataset(&self, url: &Url) -> Result<HelpToc> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("Fetching '{url}' timed out"))
                } else {
                    Error::Network(e)
                }
            })?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!("No dataset at '{url}'")));
            }
            return match response.error_for_status() {
                Err(err) => Err(Error::Network(err)),
                Ok(_) => Err(Error::Other(format!("Unexpected status {status} from '{url}'"))),
            };
        }

        let body = response.bytes().await?;
        let toc = HelpToc::from_slice(&body)?;
        info!(
            "Fetched dataset from {} ({} bytes, {} pages)",
            url,
            body.len(),
            toc.entities.pages.len()
        );
        Ok(toc)
    }
}

/// Fetches a dataset from a primary URL, with one optional fallback attempt.
pub struct HttpSource {
    fetcher: Fetcher,
    primary: Url,
    fallback: Option<Url>,
}

impl HttpSource {
    /// Create a source for a single URL.
    pub const fn new(fetcher: Fetcher, primary: Url) -> Self {
        Self {
            fetcher,
            primary,
            fallback: None,
        }
    }

    /// Try `fallback` once when the primary fetch fails.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Url) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Build a source from loader configuration.
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        let fetcher = Fetcher::with_timeout(config.timeout())?;
        let source = Self::new(fetcher, config.dataset_url()?);
        Ok(match config.fallback_url()? {
            Some(fallback) => source.with_fallback(fallback),
            None => source,
        })
    }

    /// The primary URL.
    pub const fn url(&self) -> &Url {
        &self.primary
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch_dataset(&self) -> Result<HelpToc> {
        match self.fetcher.fetch_dataset(&self.primary).await {
            Ok(toc) => Ok(toc),
            Err(err) => {
                let Some(fallback) = &self.fallback else {
                    return Err(err);
                };
                warn!("Fetching {} failed ({err}); trying {fallback}", self.primary);
                self.fetcher.fetch_dataset(fallback).await.inspect_err(|e| {
                    debug!(category = e.category(), "fallback fetch failed");
                })
            },
        }
    }
}
