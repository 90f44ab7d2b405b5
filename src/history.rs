//! Summary statistics over a product's price history.

use crate::error::EmptyHistoryError;
use crate::product::models::PriceHistoryItem;
use serde::{Deserialize, Serialize};

/// Highest observed price.
pub fn highest(history: &[PriceHistoryItem]) -> Result<f64, EmptyHistoryError> {
    history.iter().map(|item| item.price).reduce(f64::max).ok_or(EmptyHistoryError)
}

/// Lowest observed price.
pub fn lowest(history: &[PriceHistoryItem]) -> Result<f64, EmptyHistoryError> {
    history.iter().map(|item| item.price).reduce(f64::min).ok_or(EmptyHistoryError)
}

/// Mean observed price; `0.0` for an empty history.
pub fn average(history: &[PriceHistoryItem]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let sum: f64 = history.iter().map(|item| item.price).sum();
    sum / history.len() as f64
}

/// Lowest, highest and average price of a history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
}

impl PriceSummary {
    /// Summarizes a non-empty history.
    pub fn of(history: &[PriceHistoryItem]) -> Result<Self, EmptyHistoryError> {
        Ok(Self { lowest: lowest(history)?, highest: highest(history)?, average: average(history) })
    }
}
