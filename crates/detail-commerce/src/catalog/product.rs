//! Product types.
//!
//! [`Product`] is the one shape the rest of the storefront sees.
//! [`RemoteProduct`] is what the backend sends and [`StaticProduct`] is the
//! hand-authored record embedded for when the backend is unavailable; both
//! become a `Product` through [`normalize`](crate::catalog::normalize).

use crate::catalog::{CategoryRef, StoreCategory};
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product as displayed and added to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Long-form description, when known.
    pub detailed_description: Option<String>,
    pub price: Money,
    /// Price before a sale, when on sale.
    pub original_price: Option<Money>,
    /// Units in stock, when the backend reports them.
    pub stock: Option<u32>,
    pub in_stock: bool,
    pub image: ProductImage,
    pub category: Option<CategoryRef>,
    pub features: Vec<String>,
    pub specifications: Vec<Specification>,
    pub benefits: Vec<String>,
    pub usage: Option<String>,
    pub rating: f32,
    pub reviews: u32,
    pub featured: bool,
}

impl Product {
    /// Whether the product has a higher original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .is_some_and(|original| original.amount_cents > self.price.amount_cents)
    }

    /// Whether the product belongs to the given category.
    pub fn in_category(&self, id: &CategoryId) -> bool {
        self.category
            .as_ref()
            .and_then(|c| c.id.as_ref())
            .is_some_and(|c| c == id)
    }
}

/// What to show for a product: a remote picture or a synthesized icon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ProductImage {
    Remote(String),
    Icon(String),
}

impl fmt::Display for ProductImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductImage::Remote(url) => write!(f, "{url}"),
            ProductImage::Icon(icon) => write!(f, "{icon}"),
        }
    }
}

/// A named product specification, e.g. "pH Level: Neutral (7.0)".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

/// Product record as sent by the backend.
///
/// Accepts both the current camelCase fields and the legacy `prod_*`
/// names. The category may be a plain name or an object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProduct {
    pub id: ProductId,
    #[serde(alias = "prod_name")]
    pub name: String,
    #[serde(default, alias = "prod_description")]
    pub description: Option<String>,
    #[serde(alias = "prod_price")]
    pub price: RemotePrice,
    #[serde(default)]
    pub original_price: Option<RemotePrice>,
    #[serde(default, alias = "prod_quantity")]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub category: Option<RemoteCategoryRef>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: Option<u32>,
}

/// Backend prices are usually numbers in major units, occasionally
/// preformatted strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RemotePrice {
    Amount(f64),
    Text(String),
}

/// Category as referenced from a backend product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RemoteCategoryRef {
    Name(String),
    Object {
        #[serde(default, alias = "categoryId")]
        id: Option<CategoryId>,
        #[serde(default, alias = "categoryName")]
        name: Option<String>,
    },
}

impl RemoteCategoryRef {
    /// Category id, resolving a bare name through the store categories.
    pub fn id(&self) -> Option<CategoryId> {
        match self {
            RemoteCategoryRef::Name(name) => StoreCategory::from_name(name).map(|c| c.id()),
            RemoteCategoryRef::Object { id: Some(id), .. } => Some(id.clone()),
            RemoteCategoryRef::Object { id: None, name } => name
                .as_deref()
                .and_then(StoreCategory::from_name)
                .map(|c| c.id()),
        }
    }

    /// Category name, resolving a bare id through the store categories.
    pub fn name(&self) -> Option<String> {
        match self {
            RemoteCategoryRef::Name(name) => Some(name.clone()),
            RemoteCategoryRef::Object { name: Some(name), .. } => Some(name.clone()),
            RemoteCategoryRef::Object { id, name: None } => id
                .as_ref()
                .and_then(StoreCategory::from_id)
                .map(|c| c.name().to_string()),
        }
    }
}

/// Hand-authored product embedded in the binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticProduct {
    pub id: u64,
    pub category: StoreCategory,
    pub name: &'static str,
    pub price: Money,
    pub description: &'static str,
    pub detailed_description: &'static str,
    pub features: &'static [&'static str],
    pub specifications: &'static [(&'static str, &'static str)],
    pub benefits: &'static [&'static str],
    pub usage: &'static str,
    pub rating: f32,
    pub reviews: u32,
}
