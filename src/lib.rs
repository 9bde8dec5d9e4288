//! Wishlist item auto-fill.
//!
//! Reads product links into wishlist item fields: the first peso price on
//! the page, the Open Graph title and image, and a slug-derived name for
//! storefronts that block scraping. Also carries the money type used to
//! store and display those prices.

pub mod autofill;
pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod money;
pub mod storefront;
pub mod uniffi_bindings;

pub use autofill::{AutofillOutcome, ItemAutofill, Notice};
pub use builder::ItemAutofillBuilder;
pub use config::AutofillConfig;
pub use error::AutofillError;
pub use extractors::{
    extract_metadata_from_url, ExtractionResult, MetadataExtractor, OgImage, OgImageObject,
    OpenGraph,
};
pub use model::{ItemCandidates, ItemDraft};
pub use money::{display_price, CurrencyFormat, MonetaryAmount, MoneyInput};

/// Reads `url` with the default configuration
pub async fn autofill_item(url: &str) -> AutofillOutcome {
    match ItemAutofill::new(&AutofillConfig::default()) {
        Ok(autofill) => autofill.autofill(url).await,
        Err(e) => AutofillOutcome::Failed {
            error: e.to_string(),
        },
    }
}
