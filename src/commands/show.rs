//! Show command: print stored products and their price history.

use crate::config::Config;
use crate::format::Formatter;
use crate::store::ProductStore;
use anyhow::Result;

/// Reads the product store.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    /// Creates a new show command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Shows every stored product, or one product with its history.
    pub fn execute(&self, url: Option<&str>) -> Result<String> {
        let store = ProductStore::open(self.config.store_path())?;
        self.execute_with_store(&store, url)
    }

    /// Renders from a provided store (for testing).
    pub fn execute_with_store(&self, store: &ProductStore, url: Option<&str>) -> Result<String> {
        let formatter = Formatter::new(self.config.format);

        match url {
            Some(url) => {
                let product = store
                    .get(url.trim())
                    .ok_or_else(|| anyhow::anyhow!("No tracked product for URL: {}", url))?;
                Ok(formatter.format_history(product))
            }
            None => Ok(formatter.format_products(store.products())),
        }
    }
}
