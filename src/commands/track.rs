//! Track command: scrape, merge into the product store, and flag alerts.

use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use crate::notify::{classify, Notification};
use crate::product::{scrape_product, PageClient, PageFetch, ProductRecord};
use crate::store::ProductStore;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

/// Result of tracking one URL.
#[derive(Debug, Serialize)]
pub struct Tracked {
    /// The merged, stored product
    pub product: ProductRecord,
    /// Alert raised by this scrape, if any
    pub notification: Option<Notification>,
}

/// Scrapes product pages and records their prices.
pub struct TrackCommand {
    config: Config,
}

impl TrackCommand {
    /// Creates a new track command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Tracks every URL against the configured store and returns formatted output.
    pub async fn execute(&self, urls: &[String]) -> Result<String> {
        let client = PageClient::new(&self.config).context("Failed to create HTTP client")?;
        let mut store = ProductStore::open(self.config.store_path())?;

        let tracked = self.track_all(&client, &mut store, urls).await;
        store.save()?;

        // CSV output carries no alert block
        if self.config.format == OutputFormat::Csv {
            for alert in alerts(&tracked) {
                eprintln!("{}", alert);
            }
        }

        Ok(self.render(&tracked))
    }

    /// Tracks every URL with a provided fetcher and store (for testing).
    ///
    /// Failed URLs and pages without a price are logged and skipped; the rest
    /// are still merged.
    pub async fn track_all(
        &self,
        client: &impl PageFetch,
        store: &mut ProductStore,
        urls: &[String],
    ) -> Vec<Tracked> {
        let mut tracked = Vec::new();

        for url in urls {
            let scraped = match scrape_product(client, url).await {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    eprintln!("{}: {}", url, e);
                    continue;
                }
            };

            if !scraped.has_price() {
                warn!("Skipping {}: no price found on page", url);
                eprintln!("{}: no price found on page", url);
                continue;
            }

            let upsert = store.upsert(scraped.clone());
            let notification = upsert
                .previous
                .as_ref()
                .and_then(|stored| classify(&scraped, stored, self.config.discount_threshold));

            if let Some(notification) = notification {
                info!("{}: {}", url, notification);
            }

            tracked.push(Tracked { product: upsert.product.clone(), notification });
        }

        tracked
    }

    fn render(&self, tracked: &[Tracked]) -> String {
        if self.config.format == OutputFormat::Json {
            return serde_json::to_string_pretty(tracked).unwrap_or_else(|_| "[]".to_string());
        }

        let products: Vec<ProductRecord> = tracked.iter().map(|t| t.product.clone()).collect();
        let mut output = Formatter::new(self.config.format).format_products(&products);

        let alerts = alerts(tracked);
        if !alerts.is_empty() && self.config.format != OutputFormat::Csv {
            output.push_str("\n\nAlerts:\n");
            output.push_str(&alerts.join("\n"));
        }

        output
    }
}

fn alerts(tracked: &[Tracked]) -> Vec<String> {
    tracked
        .iter()
        .filter_map(|t| t.notification.map(|n| format!("{}: {}", n, t.product.url)))
        .collect()
}
