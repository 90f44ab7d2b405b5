//! Assembles extracted fields into a [`ProductRecord`].

use crate::error::ParseError;
use crate::product::document::Document;
use crate::product::extract::{
    extract_currency, extract_description, extract_images, extract_price, is_out_of_stock,
};
use crate::product::models::{ProductRecord, DEFAULT_CURRENCY};
use crate::product::normalize::{fallback_price, parse_number, strip_percent};
use crate::product::selectors;
use tracing::debug;

/// Raw per-field text pulled from a page, before numeric resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub title: String,
    pub current_price: String,
    pub original_price: String,
    pub currency: String,
    pub discount: String,
    pub out_of_stock: bool,
    pub images: Vec<String>,
    pub description: String,
}

impl RawFields {
    /// Runs every field extractor against `doc`.
    ///
    /// Missing fields degrade to empty values; only a malformed image payload fails.
    pub fn extract<D: Document>(doc: &D) -> Result<Self, ParseError> {
        let current_price =
            extract_price(selectors::CURRENT_PRICE.iter().map(|selector| doc.text_of(selector)));
        let original_price =
            extract_price(selectors::ORIGINAL_PRICE.iter().map(|selector| doc.text_of(selector)));

        let currency_text = doc.text_of(selectors::CURRENCY);
        let currency = extract_currency((!currency_text.is_empty()).then_some(currency_text));

        Ok(Self {
            title: doc.text_of(selectors::TITLE).trim().to_string(),
            current_price,
            original_price,
            currency,
            discount: strip_percent(&doc.text_of(selectors::DISCOUNT)),
            out_of_stock: is_out_of_stock(&doc.text_of(selectors::AVAILABILITY)),
            images: extract_images(doc)?,
            description: extract_description(doc),
        })
    }
}

/// Builds a fresh record for `url`, resolving price fallbacks.
///
/// The record starts as a single data point: lowest, highest and average all
/// equal the resolved current price, and the history is empty.
pub fn assemble(url: &str, raw: RawFields) -> ProductRecord {
    let current = parse_number(&raw.current_price);
    let original = parse_number(&raw.original_price);

    let current_price = fallback_price(current, original);
    let original_price = fallback_price(original, current);

    let currency =
        if raw.currency.is_empty() { DEFAULT_CURRENCY.to_string() } else { raw.currency };

    debug!(
        "Assembled {}: current={} original={} currency={} out_of_stock={}",
        url, current_price, original_price, currency, raw.out_of_stock
    );

    ProductRecord {
        url: url.to_string(),
        currency,
        image: raw.images.into_iter().next(),
        title: raw.title,
        current_price,
        original_price,
        price_history: Vec::new(),
        discount_rate: parse_number(&raw.discount),
        is_out_of_stock: raw.out_of_stock,
        description: raw.description,
        lowest_price: current_price,
        highest_price: current_price,
        average_price: current_price,
    }
}

/// Extracts and assembles a record from an already-parsed page.
pub fn extract_product<D: Document>(url: &str, doc: &D) -> Result<ProductRecord, ParseError> {
    Ok(assemble(url, RawFields::extract(doc)?))
}
