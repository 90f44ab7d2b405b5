//! price-tracker - Product page extraction and price-history tracking
//!
//! Turns raw retail product-page HTML into a normalized [`ProductRecord`] and
//! keeps lowest/highest/average price summaries as prices are re-observed.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod history;
pub mod notify;
pub mod product;
pub mod store;

pub use config::Config;
pub use error::{EmptyHistoryError, ParseError, ScrapeError};
pub use history::PriceSummary;
pub use product::models::{PriceHistoryItem, ProductRecord};
pub use store::ProductStore;
