//! Output formatting for product records (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::product::models::ProductRecord;

/// Formats a number as a thousands-grouped integer ("1,234"); `None` is `0`.
///
/// Rounds half away from zero.
pub fn format_number(value: Option<f64>) -> String {
    let value = value.unwrap_or(0.0);
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats product records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &ProductRecord) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[ProductRecord]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats a product's price history, oldest first.
    pub fn format_history(&self, product: &ProductRecord) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&product.price_history)
                .unwrap_or_else(|_| "[]".to_string()),
            OutputFormat::Csv => {
                let mut lines = vec!["date,price".to_string()];
                for item in &product.price_history {
                    lines.push(format!("{},{}", item.date.to_rfc3339(), item.price));
                }
                lines.join("\n")
            }
            OutputFormat::Table | OutputFormat::Markdown => {
                let mut lines = vec![self.format_product(product), String::new()];
                if product.price_history.is_empty() {
                    lines.push("No price history.".to_string());
                }
                for item in &product.price_history {
                    lines.push(format!(
                        "{}  {} {:.2}",
                        item.date.format("%Y-%m-%d %H:%M"),
                        product.currency,
                        item.price
                    ));
                }
                lines.join("\n")
            }
        }
    }

    // JSON formatting

    fn json_single(&self, product: &ProductRecord) -> String {
        serde_json::to_string_pretty(product).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[ProductRecord]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn money(product: &ProductRecord, value: f64) -> String {
        format!("{}{}", product.currency, format_number(Some(value)))
    }

    fn table_single(&self, product: &ProductRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:    {}", product.title));
        lines.push(format!("URL:      {}", product.url));

        if !product.has_price() {
            lines.push("Price:    N/A".to_string());
        } else if product.original_price > product.current_price {
            lines.push(format!(
                "Price:    {} (was {})",
                Self::money(product, product.current_price),
                Self::money(product, product.original_price)
            ));
        } else {
            lines.push(format!("Price:    {}", Self::money(product, product.current_price)));
        }

        match product.discount_rate {
            Some(rate) => lines.push(format!("Discount: {}%", rate)),
            None => lines.push("Discount: N/A".to_string()),
        }

        lines.push(format!(
            "Range:    low {} / high {} / avg {}",
            Self::money(product, product.lowest_price),
            Self::money(product, product.highest_price),
            Self::money(product, product.average_price)
        ));

        lines.push(format!(
            "Stock:    {}",
            if product.is_out_of_stock { "Out of Stock" } else { "In Stock" }
        ));

        if let Some(image) = &product.image {
            lines.push(format!("Image:    {}", image));
        }

        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[ProductRecord]) -> String {
        let price_width = 12;
        let low_width = 10;
        let stock_width = 5;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<price_width$}  {:<low_width$}  {:<stock_width$}  {}",
            "Price", "Lowest", "Stock", "Title"
        ));
        lines.push(format!(
            "{:-<price_width$}  {:-<low_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for product in products {
            let stock = if product.is_out_of_stock { "No" } else { "Yes" };
            lines.push(format!(
                "{:>price_width$}  {:>low_width$}  {:<stock_width$}  {}",
                Self::money(product, product.current_price),
                Self::money(product, product.lowest_price),
                stock,
                truncate(&product.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &ProductRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.title));
        lines.push(String::new());
        lines.push(format!("- **URL:** [View product]({})", product.url));

        if product.original_price > product.current_price {
            lines.push(format!(
                "- **Price:** {} ~~{}~~",
                Self::money(product, product.current_price),
                Self::money(product, product.original_price)
            ));
        } else {
            lines.push(format!("- **Price:** {}", Self::money(product, product.current_price)));
        }

        if let Some(rate) = product.discount_rate {
            lines.push(format!("- **Discount:** {}%", rate));
        }

        lines.push(format!(
            "- **Lowest / Highest / Average:** {} / {} / {}",
            Self::money(product, product.lowest_price),
            Self::money(product, product.highest_price),
            Self::money(product, product.average_price)
        ));

        if product.is_out_of_stock {
            lines.push("- **Stock:** Currently unavailable".to_string());
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[ProductRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Price | Lowest | Highest | Stock | Title |".to_string());
        lines.push("|-------|--------|---------|-------|-------|".to_string());

        for product in products {
            let stock = if product.is_out_of_stock { "" } else { "✓" };
            lines.push(format!(
                "| {} | {} | {} | {} | [{}]({}) |",
                Self::money(product, product.current_price),
                Self::money(product, product.lowest_price),
                Self::money(product, product.highest_price),
                stock,
                truncate(&product.title, 40),
                product.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products*", products.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "title,current_price,original_price,currency,discount_rate,out_of_stock,lowest_price,highest_price,average_price,history_points,url"
            .to_string()
    }

    fn csv_products(&self, products: &[ProductRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            let discount = product.discount_rate.map(|d| d.to_string()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&product.title),
                product.current_price,
                product.original_price,
                Self::csv_escape(&product.currency),
                discount,
                product.is_out_of_stock,
                product.lowest_price,
                product.highest_price,
                product.average_price,
                product.price_history.len(),
                Self::csv_escape(&product.url)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `text` to at most `width` characters, marking the cut with "...".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::models::PriceHistoryItem;
    use chrono::{TimeZone, Utc};

    fn make_product() -> ProductRecord {
        ProductRecord {
            url: "https://www.amazon.com/dp/B0TEST".to_string(),
            currency: "$".to_string(),
            image: Some("https://m.media/a.jpg".to_string()),
            title: "Ergonomic Chair, Mesh".to_string(),
            current_price: 1234.0,
            original_price: 1500.0,
            price_history: vec![PriceHistoryItem::new(
                1234.0,
                Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            )],
            discount_rate: Some(18.0),
            is_out_of_stock: false,
            description: String::new(),
            lowest_price: 1234.0,
            highest_price: 1234.0,
            average_price: 1234.0,
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Some(1234.0)), "1,234");
        assert_eq!(format_number(Some(0.0)), "0");
        assert_eq!(format_number(None), "0");
        assert_eq!(format_number(Some(999.0)), "999");
        assert_eq!(format_number(Some(1000.0)), "1,000");
        assert_eq!(format_number(Some(1234567.0)), "1,234,567");
        assert_eq!(format_number(Some(49.99)), "50");
        assert_eq!(format_number(Some(2.5)), "3");
        assert_eq!(format_number(Some(-1234567.6)), "-1,234,568");
        assert_eq!(format_number(Some(f64::NAN)), "NaN");
        assert_eq!(format_number(Some(f64::INFINITY)), "∞");
    }

    #[test]
    fn test_table_single() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_product());
        assert!(output.contains("Ergonomic Chair, Mesh"));
        assert!(output.contains("$1,234 (was $1,500)"));
        assert!(output.contains("Discount: 18%"));
        assert!(output.contains("In Stock"));
    }

    #[test]
    fn test_table_single_unknown_discount() {
        let mut product = make_product();
        product.discount_rate = None;
        let output = Formatter::new(OutputFormat::Table).format_product(&product);
        assert!(output.contains("Discount: N/A"));
    }

    #[test]
    fn test_table_single_no_price() {
        let mut product = make_product();
        product.current_price = 0.0;
        product.original_price = 0.0;
        let output = Formatter::new(OutputFormat::Table).format_product(&product);
        assert!(output.contains("Price:    N/A"));
    }

    #[test]
    fn test_table_products() {
        let output = Formatter::new(OutputFormat::Table).format_products(&[make_product()]);
        assert!(output.contains("Total: 1 products"));
        assert!(output.contains("$1,234"));
    }

    #[test]
    fn test_empty_products() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_products(&[]), "[]");
        assert_eq!(Formatter::new(OutputFormat::Table).format_products(&[]), "No products found.");
        assert!(Formatter::new(OutputFormat::Csv).format_products(&[]).starts_with("title,"));
    }

    #[test]
    fn test_json_single() {
        let output = Formatter::new(OutputFormat::Json).format_product(&make_product());
        assert!(output.starts_with('{'));
        assert!(output.contains("\"current_price\": 1234.0"));
    }

    #[test]
    fn test_markdown_single() {
        let output = Formatter::new(OutputFormat::Markdown).format_product(&make_product());
        assert!(output.contains("## Ergonomic Chair, Mesh"));
        assert!(output.contains("~~$1,500~~"));
    }

    #[test]
    fn test_csv_escapes_title() {
        let output = Formatter::new(OutputFormat::Csv).format_products(&[make_product()]);
        let row = output.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Ergonomic Chair, Mesh\",1234,1500,$,18,false"));
        assert!(row.ends_with(",1,https://www.amazon.com/dp/B0TEST"));
    }

    #[test]
    fn test_history_csv() {
        let output = Formatter::new(OutputFormat::Csv).format_history(&make_product());
        assert_eq!(output, "date,price\n2024-05-01T09:30:00+00:00,1234");
    }

    #[test]
    fn test_history_table() {
        let output = Formatter::new(OutputFormat::Table).format_history(&make_product());
        assert!(output.contains("2024-05-01 09:30  $ 1234.00"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product title", 10), "a very ...");
    }
}
