use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Desktop Firefox; several storefronts serve stripped pages to bot agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:145.0) Gecko/20100101 Firefox/145.0";

/// Main auto-fill configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AutofillConfig {
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User-Agent header sent with every page fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Currency symbol that prefixes prices on product pages
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Per-storefront routing rules
    #[serde(default)]
    pub storefronts: StorefrontsConfig,
}

/// Storefront routing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorefrontsConfig {
    /// Hosts whose pages cannot be scraped; items from them are named from
    /// the URL slug and the rest is left for manual entry
    #[serde(default = "default_manual_entry_hosts")]
    pub manual_entry: Vec<String>,
}

impl Default for StorefrontsConfig {
    fn default() -> Self {
        Self {
            manual_entry: default_manual_entry_hosts(),
        }
    }
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            currency_symbol: default_currency_symbol(),
            storefronts: StorefrontsConfig::default(),
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 {
    5000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

fn default_manual_entry_hosts() -> Vec<String> {
    vec!["shopee.ph".to_string()]
}

impl AutofillConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with WISHLIST__ prefix
    /// 2. wishlist.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: WISHLIST__TIMEOUT_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Load configuration from file and environment variables
///
/// See [`AutofillConfig::load`] for the source priority.
pub fn load_config() -> Result<AutofillConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("wishlist").required(false))
        // Use double underscore for nested: WISHLIST__STOREFRONTS__MANUAL_ENTRY
        .add_source(
            Environment::with_prefix("WISHLIST")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("storefronts.manual_entry")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
