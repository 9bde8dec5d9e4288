mod open_graph;
mod price;

pub use open_graph::{parse_open_graph, OgImage, OgImageObject, OpenGraph};
pub use price::{PriceMatch, PricePattern};

use crate::config::AutofillConfig;
use crate::error::AutofillError;
use crate::fetchers::{PageFetcher, RequestFetcher};
use log::{debug, warn};
use rust_decimal::Decimal;
use scraper::Html;
use serde::Serialize;

/// What a product page yielded.
///
/// A successful fetch with no price or no Open Graph tags is still a
/// success; only fetch failures set `success` to false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub price_raw: Option<String>,
    pub price_number: Option<Decimal>,
    pub og: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Reads the price and Open Graph data out of fetched HTML
    pub fn from_html(url: &str, html: String, prices: &PricePattern) -> Self {
        let (price_raw, price_number) = match prices.find(&html) {
            Some(found) => (Some(found.raw), found.amount),
            None => (None, None),
        };

        let og = parse_open_graph(&Html::parse_document(&html));

        Self {
            success: true,
            url: url.to_string(),
            html: Some(html),
            price_raw,
            price_number,
            og: Some(og),
            error: None,
        }
    }

    pub fn failure(url: &str, error: &AutofillError) -> Self {
        Self {
            success: false,
            url: url.to_string(),
            html: None,
            price_raw: None,
            price_number: None,
            og: None,
            error: Some(error.to_string()),
        }
    }

    /// Drops the page body, which callers rarely need to keep around
    pub fn without_html(mut self) -> Self {
        self.html = None;
        self
    }
}

/// Fetches product pages and reads their price and preview metadata
pub struct MetadataExtractor {
    fetcher: Box<dyn PageFetcher>,
    prices: PricePattern,
}

impl MetadataExtractor {
    pub fn new(config: &AutofillConfig) -> Result<Self, AutofillError> {
        let fetcher = RequestFetcher::from_config(config)?;
        Self::with_fetcher(config, Box::new(fetcher))
    }

    pub fn with_fetcher(
        config: &AutofillConfig,
        fetcher: Box<dyn PageFetcher>,
    ) -> Result<Self, AutofillError> {
        Ok(Self {
            fetcher,
            prices: PricePattern::new(&config.currency_symbol)?,
        })
    }

    /// Fetches `url` and extracts from it. Never fails: fetch errors are
    /// reported through `success` and `error`.
    pub async fn extract(&self, url: &str) -> ExtractionResult {
        match self.fetcher.fetch(url).await {
            Ok(html) => {
                let result = ExtractionResult::from_html(url, html, &self.prices);
                debug!(
                    "Extracted from {}: price {:?}, og title {:?}",
                    url,
                    result.price_raw,
                    result.og.as_ref().and_then(|og| og.title.as_deref())
                );
                result
            }
            Err(e) => {
                warn!("Error fetching HTML from {}: {}", url, e);
                ExtractionResult::failure(url, &e)
            }
        }
    }
}

/// Extracts from `url` with the default configuration
pub async fn extract_metadata_from_url(url: &str) -> ExtractionResult {
    let config = AutofillConfig::default();
    match MetadataExtractor::new(&config) {
        Ok(extractor) => extractor.extract(url).await,
        Err(e) => ExtractionResult::failure(url, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peso() -> PricePattern {
        PricePattern::new("₱").unwrap()
    }

    #[test]
    fn test_from_html_reads_price_and_og() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="Desk Lamp">
                <meta property="og:image" content="https://cdn.example/lamp.jpg">
            </head>
            <body><p>Price: ₱1,234.56 today</p></body></html>
        "#;
        let result = ExtractionResult::from_html("https://shop.example/lamp", html.into(), &peso());

        assert!(result.success);
        assert_eq!(result.price_raw.as_deref(), Some("₱1,234.56"));
        assert_eq!(result.price_number, Some(Decimal::new(123_456, 2)));
        let og = result.og.unwrap();
        assert_eq!(og.title.as_deref(), Some("Desk Lamp"));
        assert_eq!(og.image, Some(OgImage::Url("https://cdn.example/lamp.jpg".into())));
        assert!(result.html.is_some());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_missing_price_is_not_a_failure() {
        let result = ExtractionResult::from_html(
            "https://shop.example/x",
            "<html><body>No price here</body></html>".into(),
            &peso(),
        );
        assert!(result.success);
        assert_eq!(result.price_raw, None);
        assert_eq!(result.price_number, None);
    }

    #[test]
    fn test_failure_has_no_data() {
        let error = AutofillError::HttpStatus {
            status: 503,
            url: "https://shop.example/x".into(),
        };
        let result = ExtractionResult::failure("https://shop.example/x", &error);
        assert!(!result.success);
        assert!(result.error.as_deref().is_some_and(|e| e.contains("503")));
        assert!(result.html.is_none() && result.og.is_none());
        assert!(result.price_raw.is_none() && result.price_number.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let result = ExtractionResult::from_html(
            "https://shop.example/x",
            r#"<meta property="og:title" content="Mug"> ₱250"#.into(),
            &peso(),
        )
        .without_html();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["price_raw"], "₱250");
        assert_eq!(json["price_number"], "250");
        assert_eq!(json["og"]["title"], "Mug");
        assert!(json.get("html").is_none());
        assert!(json.get("error").is_none());
    }
}
