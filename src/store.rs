//! JSON-file product store.
//!
//! The store is an explicit handle: it is opened, mutated through `&mut self`
//! and saved by its owner. Merging a scrape into a stored product (append the
//! price point, recompute the summary) happens under that single borrow.

use crate::history::PriceSummary;
use crate::product::models::{PriceHistoryItem, ProductRecord};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Persisted products keyed by URL.
#[derive(Debug)]
pub struct ProductStore {
    path: PathBuf,
    products: Vec<ProductRecord>,
}

/// Outcome of merging a scraped record into the store.
#[derive(Debug)]
pub struct Upsert<'a> {
    /// The product as stored before this merge, if it existed
    pub previous: Option<ProductRecord>,
    /// The merged product
    pub product: &'a ProductRecord,
}

impl ProductStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("No store at {}, starting empty", path.display());
            return Ok(Self { path, products: Vec::new() });
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store: {}", path.display()))?;

        let products: Vec<ProductRecord> = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse store: {}", path.display()))?
        };

        debug!("Loaded {} products from {}", products.len(), path.display());
        Ok(Self { path, products })
    }

    /// Writes the store back to its file, creating parent directories.
    ///
    /// The JSON goes to a temp file in the same directory which then replaces
    /// the store, so an interrupted save leaves the old file intact.
    pub fn save(&self) -> Result<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        let json = serde_json::to_string_pretty(&self.products).context("Failed to encode store")?;

        let mut tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .with_context(|| format!("Failed to write store: {}", self.path.display()))?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))?;

        info!("Saved {} products to {}", self.products.len(), self.path.display());
        Ok(())
    }

    /// Merges a freshly scraped record, stamping the new price point now.
    pub fn upsert(&mut self, record: ProductRecord) -> Upsert<'_> {
        self.upsert_at(record, Utc::now())
    }

    /// Merges a freshly scraped record, stamping the new price point at `now`.
    ///
    /// The stored history is kept and the record's current price is appended;
    /// lowest, highest and average are recomputed over the whole history.
    pub fn upsert_at(&mut self, mut record: ProductRecord, now: DateTime<Utc>) -> Upsert<'_> {
        let index = self.products.iter().position(|p| p.url == record.url);

        let previous = index.map(|i| self.products[i].clone());
        let mut history = previous.as_ref().map(|p| p.price_history.clone()).unwrap_or_default();
        history.push(PriceHistoryItem::new(record.current_price, now));

        if let Ok(summary) = PriceSummary::of(&history) {
            record.lowest_price = summary.lowest;
            record.highest_price = summary.highest;
            record.average_price = summary.average;
        }
        record.price_history = history;

        debug!(
            "Merged {} ({} history points, lowest={} highest={} average={})",
            record.url,
            record.price_history.len(),
            record.lowest_price,
            record.highest_price,
            record.average_price
        );

        let slot = match index {
            Some(i) => {
                self.products[i] = record;
                i
            }
            None => {
                self.products.push(record);
                self.products.len() - 1
            }
        };

        Upsert { previous, product: &self.products[slot] }
    }

    /// Looks up a stored product by URL.
    pub fn get(&self, url: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.url == url)
    }

    /// All stored products, in insertion order.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Returns the number of stored products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::assemble::{assemble, RawFields};
    use chrono::TimeZone;
    use tempfile::TempDir;

    const URL: &str = "https://www.amazon.com/dp/B0TEST";

    fn scraped(url: &str, price: &str) -> ProductRecord {
        assemble(
            url,
            RawFields {
                title: "Desk Lamp".to_string(),
                current_price: price.to_string(),
                ..RawFields::default()
            },
        )
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ProductStore::open(dir.path().join("products.json")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_open_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = ProductStore::open(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse store"));
    }

    #[test]
    fn test_first_upsert_seeds_history() {
        let dir = TempDir::new().unwrap();
        let mut store = ProductStore::open(dir.path().join("products.json")).unwrap();

        let upsert = store.upsert_at(scraped(URL, "25.00"), day(1));
        assert!(upsert.previous.is_none());
        assert_eq!(upsert.product.price_history, vec![PriceHistoryItem::new(25.0, day(1))]);
        assert_eq!(upsert.product.lowest_price, 25.0);
        assert_eq!(upsert.product.highest_price, 25.0);
        assert_eq!(upsert.product.average_price, 25.0);
    }

    #[test]
    fn test_upsert_appends_and_recomputes() {
        let dir = TempDir::new().unwrap();
        let mut store = ProductStore::open(dir.path().join("products.json")).unwrap();

        store.upsert_at(scraped(URL, "30.00"), day(1));
        store.upsert_at(scraped(URL, "10.00"), day(2));
        let upsert = store.upsert_at(scraped(URL, "20.00"), day(3));

        let previous = upsert.previous.as_ref().unwrap();
        assert_eq!(previous.current_price, 10.0);
        assert_eq!(previous.price_history.len(), 2);

        let product = upsert.product;
        assert_eq!(product.current_price, 20.0);
        assert_eq!(product.price_history.len(), 3);
        assert_eq!(product.price_history[0].date, day(1));
        assert_eq!(product.lowest_price, 10.0);
        assert_eq!(product.highest_price, 30.0);
        assert_eq!(product.average_price, 20.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_upsert_keeps_products_separate() {
        let dir = TempDir::new().unwrap();
        let mut store = ProductStore::open(dir.path().join("products.json")).unwrap();

        store.upsert_at(scraped(URL, "30.00"), day(1));
        store.upsert_at(scraped("https://www.amazon.com/dp/OTHER", "5.00"), day(1));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(URL).unwrap().lowest_price, 30.0);
        assert!(store.get("https://nowhere").is_none());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("products.json");

        let mut store = ProductStore::open(&path).unwrap();
        store.upsert_at(scraped(URL, "12.50"), day(1));
        store.upsert_at(scraped(URL, "14.50"), day(2));
        store.save().unwrap();

        let reopened = ProductStore::open(&path).unwrap();
        let product = reopened.get(URL).unwrap();
        assert_eq!(product.price_history.len(), 2);
        assert_eq!(product.average_price, 13.5);
        assert_eq!(product.title, "Desk Lamp");
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_save_replaces_existing_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "[]").unwrap();

        let mut store = ProductStore::open(&path).unwrap();
        store.upsert_at(scraped(URL, "12.50"), day(1));
        store.save().unwrap();

        assert_eq!(ProductStore::open(&path).unwrap().len(), 1);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
