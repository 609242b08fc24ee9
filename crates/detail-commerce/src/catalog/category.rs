//! Category types for product organization.

use crate::ids::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    /// Image served by the backend, when it has one.
    pub image_url: Option<String>,
    /// Bundled image used when there is no remote one.
    pub fallback_image: String,
    /// Titles of the items sold in the category.
    pub items: Vec<String>,
}

impl Category {
    /// The image to display: remote if present, bundled otherwise.
    pub fn image(&self) -> &str {
        self.image_url.as_deref().unwrap_or(&self.fallback_image)
    }
}

/// A product's link to its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: Option<CategoryId>,
    pub name: String,
}

/// Category record as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCategory {
    #[serde(alias = "categoryId")]
    pub id: CategoryId,
    #[serde(alias = "categoryName")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
}

/// The four categories the storefront is built around.
///
/// Maps human-readable names to the backend's numeric ids and carries
/// the per-category presentation defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreCategory {
    CarWash,
    DetailingTools,
    Protection,
    InteriorCare,
}

impl StoreCategory {
    pub const ALL: [StoreCategory; 4] = [
        StoreCategory::CarWash,
        StoreCategory::DetailingTools,
        StoreCategory::Protection,
        StoreCategory::InteriorCare,
    ];

    /// Backend numeric id.
    pub fn number(&self) -> u64 {
        match self {
            StoreCategory::CarWash => 1,
            StoreCategory::DetailingTools => 2,
            StoreCategory::Protection => 3,
            StoreCategory::InteriorCare => 4,
        }
    }

    pub fn id(&self) -> CategoryId {
        CategoryId::from(self.number())
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoreCategory::CarWash => "Car Wash Products",
            StoreCategory::DetailingTools => "Detailing Tools",
            StoreCategory::Protection => "Protection Products",
            StoreCategory::InteriorCare => "Interior Care",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StoreCategory::CarWash => "High-quality car wash products for a spotless shine.",
            StoreCategory::DetailingTools => {
                "Professional tools for perfect car detailing results."
            }
            StoreCategory::Protection => "Advanced protection for paint, interior, and more.",
            StoreCategory::InteriorCare => "Keep your car's interior looking and feeling fresh.",
        }
    }

    /// Bundled image path.
    pub fn fallback_image(&self) -> &'static str {
        match self {
            StoreCategory::CarWash => "assets/categories/car-wash.jpg",
            StoreCategory::DetailingTools => "assets/categories/detailing-tools.jpg",
            StoreCategory::Protection => "assets/categories/protection.jpg",
            StoreCategory::InteriorCare => "assets/categories/interior-care.jpg",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            StoreCategory::CarWash => "\u{1f9fd}",
            StoreCategory::DetailingTools => "\u{1f6e0}\u{fe0f}",
            StoreCategory::Protection => "\u{1f6e1}\u{fe0f}",
            StoreCategory::InteriorCare => "\u{1fa91}",
        }
    }

    /// Look up by display name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn from_id(id: &CategoryId) -> Option<Self> {
        let number = id.as_number()?;
        Self::ALL.into_iter().find(|c| c.number() == number)
    }
}

/// Emoji for a category id; unknown ids get the interior icon.
pub fn category_emoji(id: Option<&CategoryId>) -> &'static str {
    id.and_then(StoreCategory::from_id)
        .unwrap_or(StoreCategory::InteriorCare)
        .emoji()
}

/// Emoji for a product without a picture, chosen by id range.
pub fn product_emoji(id: &ProductId) -> &'static str {
    match id.as_number() {
        Some(0..=3) => "\u{1f9f4}",
        Some(4..=6) => "\u{1f9fd}",
        Some(7..=10) => "\u{2728}",
        _ => "\u{1fa91}",
    }
}
