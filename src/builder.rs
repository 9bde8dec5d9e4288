use std::time::Duration;

use crate::config::AutofillConfig;
use crate::fetchers::PageFetcher;
use crate::{AutofillError, ItemAutofill};

/// Builder for configuring an [`ItemAutofill`]
///
/// Starts from [`AutofillConfig::default`]; every setter overrides one field.
#[derive(Default)]
pub struct ItemAutofillBuilder {
    config: AutofillConfig,
    fetcher: Option<Box<dyn PageFetcher>>,
}

impl ItemAutofillBuilder {
    /// Start from an already loaded configuration
    ///
    /// # Example
    /// ```
    /// use wishlist_autofill::{AutofillConfig, ItemAutofillBuilder};
    ///
    /// let builder = ItemAutofillBuilder::from_config(AutofillConfig::default());
    /// ```
    pub fn from_config(config: AutofillConfig) -> Self {
        Self {
            config,
            fetcher: None,
        }
    }

    /// Set a timeout for page fetches
    ///
    /// # Example
    /// ```
    /// use wishlist_autofill::ItemAutofill;
    /// use std::time::Duration;
    ///
    /// let builder = ItemAutofill::builder().timeout(Duration::from_secs(2));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config.timeout_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the User-Agent header sent to storefronts
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the currency symbol that prefixes prices
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.config.currency_symbol = symbol.into();
        self
    }

    /// Add a storefront whose links are named from their slug instead of fetched
    ///
    /// # Example
    /// ```
    /// use wishlist_autofill::ItemAutofill;
    ///
    /// let builder = ItemAutofill::builder().manual_entry_host("shopee.sg");
    /// ```
    pub fn manual_entry_host(mut self, host: impl Into<String>) -> Self {
        self.config.storefronts.manual_entry.push(host.into());
        self
    }

    /// Replace the HTTP fetcher, e.g. with a headless browser or a cache
    pub fn fetcher(mut self, fetcher: Box<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the auto-filler
    ///
    /// # Errors
    /// Returns `AutofillError` if the User-Agent is not a valid header value,
    /// the HTTP client cannot be created, or the currency symbol yields an
    /// invalid pattern.
    pub fn build(self) -> Result<ItemAutofill, AutofillError> {
        match self.fetcher {
            Some(fetcher) => ItemAutofill::with_fetcher(&self.config, fetcher),
            None => ItemAutofill::new(&self.config),
        }
    }
}

impl ItemAutofill {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use wishlist_autofill::ItemAutofill;
    ///
    /// let autofill = ItemAutofill::builder().build();
    /// assert!(autofill.is_ok());
    /// ```
    pub fn builder() -> ItemAutofillBuilder {
        ItemAutofillBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let builder = ItemAutofill::builder()
            .timeout(Duration::from_millis(750))
            .currency_symbol("$")
            .manual_entry_host("shopee.sg");

        assert_eq!(builder.config.timeout_ms, 750);
        assert_eq!(builder.config.currency_symbol, "$");
        assert_eq!(
            builder.config.storefronts.manual_entry,
            vec!["shopee.ph", "shopee.sg"]
        );
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let result = ItemAutofill::builder().user_agent("bad\nagent").build();
        assert!(matches!(result, Err(AutofillError::HeaderError(_))));
    }
}
