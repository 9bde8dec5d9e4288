//! UniFFI bindings for wishlist-autofill
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::time::Duration;

use crate::{
    AutofillConfig, AutofillError, AutofillOutcome, ExtractionResult, ItemAutofill,
    ItemCandidates, MetadataExtractor, MonetaryAmount,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible extraction result
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiExtractionResult {
    pub success: bool,
    pub url: String,
    /// Matched price text, e.g. "₱1,234.56"
    pub price_raw: Option<String>,
    /// Parsed price in minor units
    pub price_minor_units: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// First Open Graph image, whatever shape the page used
    pub image_url: Option<String>,
    pub error: Option<String>,
}

impl From<ExtractionResult> for FfiExtractionResult {
    fn from(result: ExtractionResult) -> Self {
        let og = result.og.as_ref();
        FfiExtractionResult {
            success: result.success,
            price_minor_units: result
                .price_number
                .map(|p| MonetaryAmount::from_decimal(p).to_integer()),
            title: og.and_then(|og| og.title.clone()),
            description: og.and_then(|og| og.description.clone()),
            image_url: og
                .and_then(|og| og.image.as_ref())
                .and_then(|image| image.primary_url())
                .map(str::to_string),
            url: result.url,
            price_raw: result.price_raw,
            error: result.error,
        }
    }
}

/// FFI-compatible item candidates
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiItemCandidates {
    pub name: Option<String>,
    pub price_minor_units: Option<i64>,
    pub image_url: Option<String>,
}

impl From<&ItemCandidates> for FfiItemCandidates {
    fn from(candidates: &ItemCandidates) -> Self {
        FfiItemCandidates {
            name: candidates.name.clone(),
            price_minor_units: candidates.price.as_ref().map(MonetaryAmount::to_integer),
            image_url: candidates.image_url.clone(),
        }
    }
}

/// FFI-compatible auto-fill result
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiAutofillOutcome {
    /// The link was empty
    Skipped,
    /// Storefront blocks scraping, only a name is offered
    ManualEntry {
        storefront: String,
        candidates: FfiItemCandidates,
        notice: String,
    },
    /// The page was read
    Extracted {
        candidates: FfiItemCandidates,
        notice: String,
    },
    /// The page could not be fetched
    Failed { error: String, notice: String },
}

impl From<AutofillOutcome> for FfiAutofillOutcome {
    fn from(outcome: AutofillOutcome) -> Self {
        let notice = outcome.notice().map(|n| n.message()).unwrap_or_default();
        match outcome {
            AutofillOutcome::Skipped => FfiAutofillOutcome::Skipped,
            AutofillOutcome::ManualEntry {
                storefront,
                candidates,
            } => FfiAutofillOutcome::ManualEntry {
                storefront,
                candidates: (&candidates).into(),
                notice,
            },
            AutofillOutcome::Extracted { candidates } => FfiAutofillOutcome::Extracted {
                candidates: (&candidates).into(),
                notice,
            },
            AutofillOutcome::Failed { error } => FfiAutofillOutcome::Failed { error, notice },
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiAutofillError {
    /// Invalid configuration (user agent, currency symbol, config file)
    ConfigError { message: String },
    /// Failed to set up the HTTP client
    FetchError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiAutofillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiAutofillError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiAutofillError::FetchError { message } => write!(f, "Fetch error: {}", message),
            FfiAutofillError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiAutofillError {}

impl From<AutofillError> for FfiAutofillError {
    fn from(err: AutofillError) -> Self {
        match err {
            AutofillError::FetchError(e) => FfiAutofillError::FetchError {
                message: e.to_string(),
            },
            AutofillError::HttpStatus { .. } | AutofillError::InvalidUrl(_) => {
                FfiAutofillError::FetchError {
                    message: err.to_string(),
                }
            }
            AutofillError::HeaderError(_)
            | AutofillError::PatternError(_)
            | AutofillError::ConfigError(_) => FfiAutofillError::ConfigError {
                message: err.to_string(),
            },
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiAutofillError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiAutofillError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn config_with_timeout(timeout_seconds: Option<u64>) -> AutofillConfig {
    let mut config = AutofillConfig::default();
    if let Some(secs) = timeout_seconds {
        config.timeout_ms =
            u64::try_from(Duration::from_secs(secs).as_millis()).unwrap_or(u64::MAX);
    }
    config
}

/// Fetch a product page and extract its price and preview data
///
/// # Arguments
/// * `url` - The product page
/// * `timeout_seconds` - Optional timeout in seconds (5 s if not specified)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn extract_metadata(
    url: String,
    timeout_seconds: Option<u64>,
) -> Result<FfiExtractionResult, FfiAutofillError> {
    let config = config_with_timeout(timeout_seconds);
    let rt = create_runtime()?;
    rt.block_on(async {
        let extractor = MetadataExtractor::new(&config)?;
        Ok::<FfiExtractionResult, FfiAutofillError>(extractor.extract(&url).await.into())
    })
}

/// Read a pasted product link into item fields
///
/// # Arguments
/// * `url` - The pasted link
/// * `timeout_seconds` - Optional timeout in seconds (5 s if not specified)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn autofill_item(
    url: String,
    timeout_seconds: Option<u64>,
) -> Result<FfiAutofillOutcome, FfiAutofillError> {
    let config = config_with_timeout(timeout_seconds);
    let rt = create_runtime()?;
    rt.block_on(async {
        let autofill = ItemAutofill::new(&config)?;
        Ok::<FfiAutofillOutcome, FfiAutofillError>(autofill.autofill(&url).await.into())
    })
}

/// Format stored minor units for display, e.g. 123456 -> "₱1,234.56"
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn format_minor_units(minor_units: i64) -> String {
    MonetaryAmount::from_integer(minor_units).to_string()
}

/// Parse typed text into minor units; unreadable text gives 0
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_to_minor_units(text: String) -> i64 {
    MonetaryAmount::new(text).to_integer()
}

/// Filter a price field's text on change
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn sanitize_money_input(text: String) -> String {
    crate::money::sanitize_money_input(&text)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
