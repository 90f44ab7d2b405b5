//! HTTP fetching of product pages using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::product::assemble::extract_product;
use crate::product::document::HtmlDocument;
use crate::product::models::ProductRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for fetching raw page HTML - enables mocking for tests.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetches `url` and returns the response body.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP client with browser impersonation and a politeness delay.
pub struct PageClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl PageClient {
    /// Creates a new page client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, delay_ms: config.delay_ms, delay_jitter_ms: config.delay_jitter_ms })
    }

    /// Adds a random delay between requests.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl PageFetch for PageClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503) fetching {}", url);
            anyhow::bail!("Rate limited (503). Try increasing --delay or using a proxy.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

/// Fetches a product page and extracts a fresh [`ProductRecord`] from it.
///
/// Transport failures and malformed page payloads both surface as [`ScrapeError`].
pub async fn scrape_product(
    fetcher: &(impl PageFetch + ?Sized),
    url: &str,
) -> std::result::Result<ProductRecord, ScrapeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ScrapeError::Transport("no URL provided".to_string()));
    }

    info!("Scraping product: {}", url);

    let html = fetcher.fetch(url).await.map_err(|e| ScrapeError::Transport(format!("{:#}", e)))?;

    let document = HtmlDocument::parse(&html);
    Ok(extract_product(url, &document)?)
}
