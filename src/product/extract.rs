//! Field extractors: ordered candidate chains with first-match short-circuit.

use crate::error::ParseError;
use crate::product::document::{Document, Node};
use crate::product::normalize::{clean_price_text, first_char};
use crate::product::selectors;
use serde_json::Value;
use tracing::{debug, trace};

/// Returns the cleaned price of the first candidate with non-empty text.
///
/// Scanning stops at that candidate even if cleaning leaves nothing, so a
/// noisy non-numeric candidate shadows any valid price after it.
pub fn extract_price<N: Node>(candidates: impl IntoIterator<Item = N>) -> String {
    for (index, candidate) in candidates.into_iter().enumerate() {
        let text = candidate.text();
        let text = text.trim();
        if !text.is_empty() {
            trace!("Price candidate {} won with text {:?}", index, text);
            return clean_price_text(text);
        }
    }
    String::new()
}

/// First character of the node's text, or empty when there is no node.
pub fn extract_currency<N: Node>(node: Option<N>) -> String {
    node.map(|n| first_char(&n.text())).unwrap_or_default()
}

/// Text of the first description group that matches anything, one line per element.
pub fn extract_description<D: Document>(doc: &D) -> String {
    for group in selectors::DESCRIPTION {
        let nodes = doc.query(group);
        if !nodes.is_empty() {
            debug!("Description from {:?} ({} elements)", group, nodes.len());
            return nodes.iter().map(|n| n.text().trim().to_string()).collect::<Vec<_>>().join("\n");
        }
    }
    String::new()
}

/// Image URLs from the dynamic-image JSON map, in document order.
///
/// Falls back from the primary to the secondary image element; an absent or
/// empty attribute means no images. A present but malformed or `null`
/// payload is a [`ParseError`].
pub fn extract_images<D: Document>(doc: &D) -> Result<Vec<String>, ParseError> {
    let raw = selectors::IMAGES
        .iter()
        .filter_map(|selector| doc.query_attribute(selector, selectors::DYNAMIC_IMAGE_ATTR))
        .find(|value| !value.is_empty());

    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(map) => Ok(map.keys().cloned().collect()),
        Value::Null => Err(ParseError::NullImageMap),
        other => {
            debug!("Dynamic image attribute is not an object: {}", other);
            Ok(Vec::new())
        }
    }
}

/// Exact match of the normalized availability text against the out-of-stock label.
pub fn is_out_of_stock(availability: &str) -> bool {
    availability.trim().to_lowercase() == selectors::OUT_OF_STOCK_TEXT
}
