use crate::config::AutofillConfig;
use crate::error::AutofillError;
use crate::extractors::{ExtractionResult, MetadataExtractor};
use crate::fetchers::PageFetcher;
use crate::model::{ItemCandidates, ItemDraft};
use crate::money::MonetaryAmount;
use crate::storefront::{name_from_slug, Storefront, StorefrontRules};
use log::{debug, info};
use serde::Serialize;

/// Result of reading one product link
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AutofillOutcome {
    /// The link was empty
    Skipped,
    /// The storefront cannot be read; only a slug-derived name is offered
    ManualEntry {
        storefront: String,
        candidates: ItemCandidates,
    },
    /// The page was fetched; `candidates` may still be empty
    Extracted { candidates: ItemCandidates },
    /// The page could not be fetched
    Failed { error: String },
}

/// Message the item form should show after a link was read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    ManualEntryRequired { storefront: String },
    PriceMayDiffer,
    NothingFound,
    LoadFailed,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::ManualEntryRequired { storefront } => format!(
                "{storefront} links do not let us grab the product's price and image. \
                 Please add the price and image manually."
            ),
            Notice::PriceMayDiffer => "The price filled below might differ from the price at \
                 the platform. Please check the current price and adjust accordingly."
                .to_string(),
            Notice::NothingFound => "We could not find product details on that page. \
                 Please fill them in manually."
                .to_string(),
            Notice::LoadFailed => {
                "Could not load details from that link. Please fill them in manually.".to_string()
            }
        }
    }
}

impl AutofillOutcome {
    pub fn candidates(&self) -> Option<&ItemCandidates> {
        match self {
            AutofillOutcome::ManualEntry { candidates, .. }
            | AutofillOutcome::Extracted { candidates } => Some(candidates),
            AutofillOutcome::Skipped | AutofillOutcome::Failed { .. } => None,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        match self {
            AutofillOutcome::Skipped => None,
            AutofillOutcome::ManualEntry { storefront, .. } => Some(Notice::ManualEntryRequired {
                storefront: storefront.clone(),
            }),
            AutofillOutcome::Extracted { candidates } if candidates.is_empty() => {
                Some(Notice::NothingFound)
            }
            AutofillOutcome::Extracted { .. } => Some(Notice::PriceMayDiffer),
            AutofillOutcome::Failed { .. } => Some(Notice::LoadFailed),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AutofillOutcome::Failed { .. })
    }
}

impl From<&ExtractionResult> for ItemCandidates {
    fn from(result: &ExtractionResult) -> Self {
        let price = result
            .price_number
            .filter(|p| !p.is_zero())
            .map(MonetaryAmount::from_decimal);

        let og = result.og.as_ref();
        let name = og
            .and_then(|og| og.title.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let image_url = og
            .and_then(|og| og.image.as_ref())
            .and_then(|image| image.primary_url())
            .map(str::to_string);

        ItemCandidates {
            name,
            price,
            image_url,
        }
    }
}

/// Turns pasted product links into item fields.
///
/// Every call fetches again; nothing is cached or deduplicated, and
/// overlapping calls are not cancelled.
pub struct ItemAutofill {
    extractor: MetadataExtractor,
    storefronts: StorefrontRules,
}

impl ItemAutofill {
    pub fn new(config: &AutofillConfig) -> Result<Self, AutofillError> {
        Ok(Self {
            extractor: MetadataExtractor::new(config)?,
            storefronts: StorefrontRules::from_config(&config.storefronts),
        })
    }

    pub fn with_fetcher(
        config: &AutofillConfig,
        fetcher: Box<dyn PageFetcher>,
    ) -> Result<Self, AutofillError> {
        Ok(Self {
            extractor: MetadataExtractor::with_fetcher(config, fetcher)?,
            storefronts: StorefrontRules::from_config(&config.storefronts),
        })
    }

    /// Reads `url` into candidate item fields
    pub async fn autofill(&self, url: &str) -> AutofillOutcome {
        let url = url.trim();
        if url.is_empty() {
            return AutofillOutcome::Skipped;
        }

        if let Storefront::ManualEntry { host } = self.storefronts.classify(url) {
            info!("{} cannot be scraped, naming the item from its link", host);
            return AutofillOutcome::ManualEntry {
                storefront: host,
                candidates: ItemCandidates {
                    name: name_from_slug(url),
                    ..Default::default()
                },
            };
        }

        let result = self.extractor.extract(url).await;
        if !result.success {
            return AutofillOutcome::Failed {
                error: result.error.unwrap_or_else(|| "Unknown error".to_string()),
            };
        }

        let candidates = ItemCandidates::from(&result);
        debug!("Candidates for {}: {:?}", url, candidates);
        AutofillOutcome::Extracted { candidates }
    }

    /// Records `url` as the item's link, reads it, and merges whatever it
    /// produced into `draft`. A failed read leaves the other fields alone.
    pub async fn fill_draft(&self, draft: &mut ItemDraft, url: &str) -> AutofillOutcome {
        if !url.trim().is_empty() {
            draft.original_link = url.trim().to_string();
        }
        let outcome = self.autofill(url).await;
        if let Some(candidates) = outcome.candidates() {
            draft.merge(candidates);
        }
        outcome
    }
}
