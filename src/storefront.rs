use crate::config::StorefrontsConfig;
use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

/// `-i.<shop id>.<item id>` closes every product slug on these storefronts.
static PRODUCT_ID_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-i\.\d+.*").unwrap());

/// How a product link should be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storefront {
    /// Pages can be fetched and read
    Scrapeable,
    /// Pages block scraping; only the slug-derived name is available and the
    /// user enters price and image by hand
    ManualEntry { host: String },
}

/// Routes links by host
#[derive(Debug, Clone)]
pub struct StorefrontRules {
    manual_entry_hosts: Vec<String>,
}

impl StorefrontRules {
    pub fn new(manual_entry_hosts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            manual_entry_hosts: manual_entry_hosts
                .into_iter()
                .map(|h| {
                    let h: String = h.into();
                    h.trim().to_ascii_lowercase()
                })
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &StorefrontsConfig) -> Self {
        Self::new(config.manual_entry.iter().cloned())
    }

    /// Classifies `url`; links that do not parse are treated as scrapeable
    /// and left for the fetch to reject.
    pub fn classify(&self, url: &str) -> Storefront {
        let Ok(parsed) = Url::parse(url.trim()) else {
            return Storefront::Scrapeable;
        };
        let Some(host) = parsed.host_str() else {
            return Storefront::Scrapeable;
        };
        let host = host.to_ascii_lowercase();

        let matched = self.manual_entry_hosts.iter().find(|known| {
            host == **known
                || host
                    .strip_suffix(known.as_str())
                    .is_some_and(|sub| sub.ends_with('.'))
        });

        match matched {
            Some(known) => Storefront::ManualEntry {
                host: known.clone(),
            },
            None => Storefront::Scrapeable,
        }
    }
}

impl Default for StorefrontRules {
    fn default() -> Self {
        Self::from_config(&StorefrontsConfig::default())
    }
}

/// Derives an item name from a product slug.
///
/// `https://shopee.ph/some-cool-gadget-i.123456.789?foo=bar` names the item
/// `some cool gadget`. Returns `None` when the path has no usable slug.
pub fn name_from_slug(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let segment = parsed.path_segments()?.next()?;
    let segment = percent_decode_str(segment).decode_utf8_lossy();

    let name = PRODUCT_ID_SUFFIX.replace(&segment, "").replace('-', " ");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_host() {
        let rules = StorefrontRules::default();
        let manual = Storefront::ManualEntry {
            host: "shopee.ph".into(),
        };

        assert_eq!(rules.classify("https://shopee.ph/some-item-i.1.2"), manual);
        assert_eq!(rules.classify("https://www.shopee.ph/some-item-i.1.2"), manual);
        assert_eq!(rules.classify("https://SHOPEE.PH/x"), manual);
        assert_eq!(
            rules.classify("https://www.lazada.com.ph/products/x.html"),
            Storefront::Scrapeable
        );
        // only whole labels match
        assert_eq!(rules.classify("https://notshopee.ph/x"), Storefront::Scrapeable);
        assert_eq!(rules.classify("not a url"), Storefront::Scrapeable);
    }

    #[test]
    fn test_configured_hosts() {
        let rules = StorefrontRules::new(["shopee.sg", " "]);
        assert!(matches!(
            rules.classify("https://shopee.sg/x"),
            Storefront::ManualEntry { .. }
        ));
        assert_eq!(rules.classify("https://shopee.ph/x"), Storefront::Scrapeable);
    }

    #[test]
    fn test_name_from_slug() {
        assert_eq!(
            name_from_slug("https://shopee.ph/some-cool-gadget-i.123456?foo=bar").as_deref(),
            Some("some cool gadget")
        );
        assert_eq!(
            name_from_slug("https://shopee.ph/Mini-Fan-Rechargeable-i.11.22/extra").as_deref(),
            Some("Mini Fan Rechargeable")
        );
        assert_eq!(
            name_from_slug("https://shopee.ph/Caf%C3%A9-Mug-i.1.2").as_deref(),
            Some("Café Mug")
        );
    }

    #[test]
    fn test_name_from_slug_without_name() {
        assert_eq!(name_from_slug("https://shopee.ph/"), None);
        assert_eq!(name_from_slug("https://shopee.ph/-i.1.2"), None);
        assert_eq!(name_from_slug("garbage"), None);
    }
}
