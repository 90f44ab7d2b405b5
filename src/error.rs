//! Error types for extraction and price-history aggregation.

use thiserror::Error;

/// A failed scrape of a single product page.
///
/// Fatal for that one URL only; batch callers log it and move on.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page could not be fetched.
    #[error("Failed to scrape product: {0}")]
    Transport(String),

    /// The page was fetched but carried a malformed payload.
    #[error("Failed to scrape product: {0}")]
    Parse(#[from] ParseError),
}

/// Structurally malformed page data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The `data-a-dynamic-image` attribute was present but not valid JSON.
    #[error("malformed dynamic image attribute: {0}")]
    DynamicImage(#[from] serde_json::Error),

    /// The `data-a-dynamic-image` attribute held JSON `null`.
    #[error("dynamic image attribute is null")]
    NullImageMap,
}

/// An extreme (highest/lowest) was requested over an empty price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("price history is empty")]
pub struct EmptyHistoryError;
