use crate::money::MonetaryAmount;
use serde::{Deserialize, Serialize};

/// The wishlist item being edited.
///
/// Owned by the caller's form and storage layer; this crate only fills it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub name: String,
    /// Price in minor units (centavos)
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub original_link: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Values a product link produced for an item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemCandidates {
    pub name: Option<String>,
    pub price: Option<MonetaryAmount>,
    pub image_url: Option<String>,
}

impl ItemCandidates {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.image_url.is_none()
    }
}

impl ItemDraft {
    pub fn new(original_link: impl Into<String>) -> Self {
        Self {
            original_link: original_link.into(),
            ..Default::default()
        }
    }

    /// Copies over only the fields `candidates` carries, leaving the rest
    /// of the draft as the user left it. The price is stored in minor units.
    pub fn merge(&mut self, candidates: &ItemCandidates) {
        if let Some(name) = &candidates.name {
            self.name = name.clone();
        }
        if let Some(price) = &candidates.price {
            self.price = Some(price.to_integer());
        }
        if let Some(image_url) = &candidates.image_url {
            self.image_url = Some(image_url.clone());
        }
    }

    /// The name to save, with the placeholder used for unnamed items
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "Wishlist Item"
        } else {
            name
        }
    }
}
