//! Data models for extracted products and their price history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency symbol used when the page shows none.
pub const DEFAULT_CURRENCY: &str = "$";

/// Normalized result of one extraction pass over a product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product page URL
    pub url: String,
    /// Single-character currency symbol
    pub currency: String,
    /// First image URL, if the page has any
    pub image: Option<String>,
    /// Product title (empty if not found)
    pub title: String,
    /// Current price, falling back to the original price
    pub current_price: f64,
    /// Original price, falling back to the current price
    pub original_price: f64,
    /// Observed prices, oldest first
    #[serde(default)]
    pub price_history: Vec<PriceHistoryItem>,
    /// Discount percentage; `None` when the page shows none
    pub discount_rate: Option<f64>,
    /// Whether the page reports the product as unavailable
    pub is_out_of_stock: bool,
    /// Product description (may be empty)
    #[serde(default)]
    pub description: String,
    /// Lowest observed price
    pub lowest_price: f64,
    /// Highest observed price
    pub highest_price: f64,
    /// Mean observed price
    pub average_price: f64,
}

impl ProductRecord {
    /// Returns true if the record carries a usable price.
    pub fn has_price(&self) -> bool {
        self.current_price > 0.0
    }
}

/// One observed price for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryItem {
    pub price: f64,
    pub date: DateTime<Utc>,
}

impl PriceHistoryItem {
    /// Creates a history point stamped with `date`.
    pub fn new(price: f64, date: DateTime<Utc>) -> Self {
        Self { price, date }
    }

    /// Creates a history point stamped now.
    pub fn now(price: f64) -> Self {
        Self::new(price, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> ProductRecord {
        ProductRecord {
            url: "https://www.amazon.com/dp/B0TEST".to_string(),
            currency: "$".to_string(),
            image: Some("https://m.media/a.jpg".to_string()),
            title: "Test Product".to_string(),
            current_price: 20.0,
            original_price: 40.0,
            price_history: Vec::new(),
            discount_rate: Some(50.0),
            is_out_of_stock: false,
            description: "Line one\nLine two".to_string(),
            lowest_price: 20.0,
            highest_price: 20.0,
            average_price: 20.0,
        }
    }

    #[test]
    fn test_has_price() {
        let mut record = make_record();
        assert!(record.has_price());
        record.current_price = 0.0;
        assert!(!record.has_price());
    }

    #[test]
    fn test_unknown_discount_serializes_as_null() {
        let mut record = make_record();
        record.discount_rate = None;
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"discount_rate\":null"));
    }

    #[test]
    fn test_record_serde() {
        let mut record = make_record();
        record.price_history.push(PriceHistoryItem::now(20.0));
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ProductRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
