//! CSS selector chains for retail product pages.
//!
//! Each chain is tried in order and the first usable candidate wins.
//! Update this file when the markup changes, and add a fixture case.

/// Product title.
pub const TITLE: &str = "#productTitle";

/// Current (sale) price candidates.
pub const CURRENT_PRICE: &[&str] = &[
    ".priceToPay span.a-price-whole",
    ".a.size.base.a-color-price",
    ".a-button-selected .a-color-base",
];

/// Original (list) price candidates.
pub const ORIGINAL_PRICE: &[&str] = &[
    "#priceblock_ourprice",
    ".a-price.a-text-price span.a-offscreen",
    "#listPrice",
    "#priceblock_dealprice",
    ".a-size-base.a-color-price",
];

/// Currency symbol.
pub const CURRENCY: &str = ".a-price-symbol";

/// Discount percentage, e.g. "-20%".
pub const DISCOUNT: &str = ".savingsPercentage";

/// Availability text.
pub const AVAILABILITY: &str = "#availability span";

/// Availability text marking a product out of stock (compared lower-cased).
pub const OUT_OF_STOCK_TEXT: &str = "currently unavailable";

/// Elements carrying the dynamic image map, in priority order.
pub const IMAGES: &[&str] = &["#imgBlkFront", "#landingImage"];

/// JSON object attribute whose keys are image URLs.
pub const DYNAMIC_IMAGE_ATTR: &str = "data-a-dynamic-image";

/// Description groups. Only the first group with matches is used.
pub const DESCRIPTION: &[&str] = &[".a-unordered-list .a-list-item", ".a-expander-content p"];

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_selectors_compile() {
        let all = [TITLE, CURRENCY, DISCOUNT, AVAILABILITY]
            .into_iter()
            .chain(CURRENT_PRICE.iter().copied())
            .chain(ORIGINAL_PRICE.iter().copied())
            .chain(IMAGES.iter().copied())
            .chain(DESCRIPTION.iter().copied());

        for selector in all {
            assert!(Selector::parse(selector).is_ok(), "selector failed to parse: {}", selector);
        }
    }

    #[test]
    fn test_out_of_stock_text_is_normalized() {
        assert_eq!(OUT_OF_STOCK_TEXT, OUT_OF_STOCK_TEXT.trim().to_lowercase());
    }
}
