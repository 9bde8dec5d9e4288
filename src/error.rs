use thiserror::Error;

/// Errors that can occur while fetching and reading product pages
#[derive(Error, Debug)]
pub enum AutofillError {
    /// Failed to fetch the product page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The storefront answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },

    /// The link could not be parsed as an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// The configured currency symbol produced an unusable pattern
    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
