//! Read-only DOM query capability the extractors run against.
//!
//! Extraction logic only ever sees [`Document`] and [`Node`], so it can be
//! driven by hand-built documents in tests. [`HtmlDocument`] binds the traits
//! to the `scraper` crate for real pages.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// A text-bearing element.
pub trait Node {
    /// Returns the element's text content.
    fn text(&self) -> String;
}

impl Node for &str {
    fn text(&self) -> String {
        (*self).to_string()
    }
}

impl Node for String {
    fn text(&self) -> String {
        self.clone()
    }
}

/// A parsed page queryable by CSS selector.
pub trait Document {
    /// Element handle borrowed from the document.
    type Node<'a>: Node
    where
        Self: 'a;

    /// Returns every element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Vec<Self::Node<'_>>;

    /// Returns attribute `name` of the first element matching `selector`.
    fn query_attribute(&self, selector: &str, name: &str) -> Option<String>;

    /// Concatenated text of every element matching `selector`.
    fn text_of(&self, selector: &str) -> String {
        self.query(selector).iter().map(|node| node.text()).collect()
    }
}

/// [`Document`] over an HTML page parsed with `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    fn selector(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("Invalid selector {:?}: {:?}", selector, e);
                None
            }
        }
    }
}

/// An element of an [`HtmlDocument`].
pub struct HtmlNode<'a>(ElementRef<'a>);

impl Node for HtmlNode<'_> {
    fn text(&self) -> String {
        self.0.text().collect()
    }
}

impl Document for HtmlDocument {
    type Node<'a> = HtmlNode<'a>;

    fn query(&self, selector: &str) -> Vec<HtmlNode<'_>> {
        let Some(selector) = Self::selector(selector) else {
            return Vec::new();
        };
        self.html.select(&selector).map(HtmlNode).collect()
    }

    fn query_attribute(&self, selector: &str, name: &str) -> Option<String> {
        let selector = Self::selector(selector)?;
        self.html.select(&selector).next()?.value().attr(name).map(String::from)
    }
}

/// Hand-built document keyed by literal selector strings.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct FakeDocument {
    nodes: std::collections::HashMap<String, Vec<String>>,
    attributes: std::collections::HashMap<(String, String), String>,
}

#[cfg(test)]
impl FakeDocument {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_nodes(mut self, selector: &str, texts: &[&str]) -> Self {
        self.nodes.insert(selector.to_string(), texts.iter().map(|t| t.to_string()).collect());
        self
    }

    pub(crate) fn with_attribute(mut self, selector: &str, name: &str, value: &str) -> Self {
        self.attributes.insert((selector.to_string(), name.to_string()), value.to_string());
        self
    }
}

#[cfg(test)]
impl Document for FakeDocument {
    type Node<'a> = &'a str;

    fn query(&self, selector: &str) -> Vec<&str> {
        self.nodes
            .get(selector)
            .map(|texts| texts.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn query_attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.attributes.get(&(selector.to_string(), name.to_string())).cloned()
    }
}
