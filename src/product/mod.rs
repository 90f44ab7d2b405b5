//! Product page extraction: DOM binding, selector chains, field extractors,
//! record assembly and page fetching.

pub mod assemble;
pub mod client;
pub mod document;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod selectors;

pub use assemble::{assemble, extract_product, RawFields};
pub use client::{scrape_product, PageClient, PageFetch};
pub use document::{Document, HtmlDocument, Node};
pub use models::{PriceHistoryItem, ProductRecord};
