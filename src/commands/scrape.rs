//! Scrape command: extract product records without persisting them.

use crate::config::Config;
use crate::format::Formatter;
use crate::product::{scrape_product, PageClient, PageFetch, ProductRecord};
use anyhow::{Context, Result};
use tracing::warn;

/// Fetches product pages and prints the extracted records.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes every URL and returns formatted output.
    pub async fn execute(&self, urls: &[String]) -> Result<String> {
        let client = PageClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, urls).await
    }

    /// Scrapes with a provided fetcher (for testing).
    ///
    /// A single URL must succeed; in a batch, failed URLs are reported and skipped.
    pub async fn execute_with_client(
        &self,
        client: &impl PageFetch,
        urls: &[String],
    ) -> Result<String> {
        let formatter = Formatter::new(self.config.format);

        if let [url] = urls {
            let record = scrape_product(client, url).await?;
            return Ok(formatter.format_product(&record));
        }

        let mut records: Vec<ProductRecord> = Vec::new();
        for url in urls {
            match scrape_product(client, url).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    eprintln!("{}: {}", url, e);
                }
            }
        }

        Ok(formatter.format_products(&records))
    }
}
