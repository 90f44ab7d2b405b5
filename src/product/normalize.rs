//! Text cleanup for prices, currency symbols and percentages.

use regex_lite::Regex;
use std::sync::LazyLock;

/// A "dollars.cents" price embedded in cleaned digit text.
static TWO_DECIMAL_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d{2}").expect("valid price pattern"));

/// Strips everything but ASCII digits and `.` from `raw`.
///
/// If the remainder contains `digits.dd`, the first such match is returned so
/// that concatenated noise (ranges, repeated offscreen prices) is dropped.
/// Otherwise the whole cleaned string is returned, which may be empty.
pub fn clean_price_text(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

    match TWO_DECIMAL_PRICE.find(&cleaned) {
        Some(m) => m.as_str().to_string(),
        None => cleaned,
    }
}

/// First character of the trimmed text, or an empty string.
pub fn first_char(raw: &str) -> String {
    raw.trim().chars().next().map(String::from).unwrap_or_default()
}

/// Removes sign and percent characters from a discount label ("-20%" -> "20").
pub fn strip_percent(raw: &str) -> String {
    raw.chars().filter(|c| *c != '-' && *c != '%').collect()
}

/// Parses trimmed text as a finite number.
///
/// Empty or unparsable text is `None`, never a stray nonzero value.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Keeps a value only if it counts as present: not missing, zero or NaN.
pub fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Resolves a price, falling back to `other` when `preferred` is not usable.
///
/// Yields `0.0` when neither side is usable.
pub fn fallback_price(preferred: Option<f64>, other: Option<f64>) -> f64 {
    truthy(preferred).or(truthy(other)).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_price_text() {
        assert_eq!(clean_price_text("$1,234.56 USD"), "1234.56");
        assert_eq!(clean_price_text("Save 20%"), "20");
        assert_eq!(clean_price_text(""), "");
        assert_eq!(clean_price_text("$29.99"), "29.99");
        assert_eq!(clean_price_text("1,299."), "1299.");
    }

    #[test]
    fn test_clean_price_text_picks_first_two_decimal_match() {
        // Offscreen and visible prices often sit side by side.
        assert_eq!(clean_price_text("$19.99$19.99"), "19.99");
        assert_eq!(clean_price_text("$10.00 - $20.00"), "10.00");
        // Only two decimals are taken even when more digits follow.
        assert_eq!(clean_price_text("12.3456"), "12.34");
    }

    #[test]
    fn test_clean_price_text_non_numeric() {
        assert_eq!(clean_price_text("See price in cart"), "");
        assert_eq!(clean_price_text("N/A"), "");
    }

    #[test]
    fn test_first_char() {
        assert_eq!(first_char("€129"), "€");
        assert_eq!(first_char("  $ "), "$");
        assert_eq!(first_char(""), "");
        assert_eq!(first_char("   \n"), "");
    }

    #[test]
    fn test_strip_percent() {
        assert_eq!(strip_percent("-20%"), "20");
        assert_eq!(strip_percent(" -5% "), " 5 ");
        assert_eq!(strip_percent(""), "");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("49.99"), Some(49.99));
        assert_eq!(parse_number(" 20 "), Some(20.0));
        assert_eq!(parse_number("1299."), Some(1299.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_truthy() {
        assert_eq!(truthy(Some(1.5)), Some(1.5));
        assert_eq!(truthy(Some(0.0)), None);
        assert_eq!(truthy(Some(f64::NAN)), None);
        assert_eq!(truthy(None), None);
    }

    #[test]
    fn test_fallback_price() {
        assert_eq!(fallback_price(Some(10.0), Some(20.0)), 10.0);
        assert_eq!(fallback_price(None, Some(20.0)), 20.0);
        assert_eq!(fallback_price(Some(0.0), Some(20.0)), 20.0);
        assert_eq!(fallback_price(None, None), 0.0);
        assert_eq!(fallback_price(Some(0.0), None), 0.0);
    }
}
