//! Alert classification for tracked products.
//!
//! Decides which alert, if any, a fresh scrape warrants compared to the stored
//! product. Delivering the alert is left to the caller.

use crate::history::lowest;
use crate::product::models::ProductRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason a tracked product deserves attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    /// Price dropped below every previously observed price
    LowestPrice,
    /// Product came back in stock
    ChangeOfStock,
    /// Discount reached the configured threshold
    ThresholdMet,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::LowestPrice => write!(f, "lowest price ever"),
            Notification::ChangeOfStock => write!(f, "back in stock"),
            Notification::ThresholdMet => write!(f, "discount threshold met"),
        }
    }
}

/// Classifies a scrape against the stored product. The first matching rule wins.
///
/// A scrape without a price never counts as a new low.
pub fn classify(
    scraped: &ProductRecord,
    stored: &ProductRecord,
    threshold: f64,
) -> Option<Notification> {
    if let Ok(lowest) = lowest(&stored.price_history) {
        if scraped.has_price() && scraped.current_price < lowest {
            return Some(Notification::LowestPrice);
        }
    }

    if !scraped.is_out_of_stock && stored.is_out_of_stock {
        return Some(Notification::ChangeOfStock);
    }

    match scraped.discount_rate {
        Some(rate) if rate >= threshold => Some(Notification::ThresholdMet),
        _ => None,
    }
}
