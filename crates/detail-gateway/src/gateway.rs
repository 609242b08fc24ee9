//! Remote-first catalog reads with the embedded catalog as fallback.

use crate::api::{CatalogApi, HttpCatalogApi};
use crate::catalog;
use detail_commerce::catalog::{
    normalize, normalize_category, Category, CategoryRef, NormalizeContext, Product,
    ProductRecord, RemoteCategory, RemoteProduct, StaticProduct, StoreCategory,
};
use detail_commerce::ids::{CategoryId, ProductId};
use detail_data::{FailureKind, FetchClient, FetchError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Which products to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductScope {
    All,
    /// A display name such as "Car Wash Products". Names outside the store
    /// categories fetch everything.
    CategoryName(String),
    CategoryId(CategoryId),
}

impl ProductScope {
    /// The category id to fetch, `None` for the whole catalog.
    pub fn category_id(&self) -> Option<CategoryId> {
        match self {
            ProductScope::All => None,
            ProductScope::CategoryName(name) => StoreCategory::from_name(name).map(|c| c.id()),
            ProductScope::CategoryId(id) => Some(id.clone()),
        }
    }
}

impl fmt::Display for ProductScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductScope::All => f.write_str("all"),
            ProductScope::CategoryName(name) => write!(f, "category '{name}'"),
            ProductScope::CategoryId(id) => write!(f, "category #{id}"),
        }
    }
}

/// Why the embedded catalog was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "kind", rename_all = "lowercase")]
pub enum FallbackReason {
    /// The backend answered with nothing.
    Empty,
    /// The backend could not be used.
    Unavailable(FailureKind),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Empty => f.write_str("backend returned no records"),
            FallbackReason::Unavailable(kind) => write!(f, "backend unavailable ({kind})"),
        }
    }
}

/// Where fetched data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Source {
    Remote,
    Fallback {
        #[serde(flatten)]
        reason: FallbackReason,
    },
}

impl Source {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Source::Fallback { .. })
    }
}

/// Data plus the source it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fetched<T> {
    pub data: T,
    pub source: Source,
}

impl<T> Fetched<T> {
    pub fn remote(data: T) -> Self {
        Self {
            data,
            source: Source::Remote,
        }
    }

    pub fn fallback(data: T, reason: FallbackReason) -> Self {
        Self {
            data,
            source: Source::Fallback { reason },
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source.is_fallback()
    }
}

/// A category together with its products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListing {
    pub category: Category,
    pub products: Vec<Product>,
}

/// Failures the gateway surfaces instead of falling back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend rejected the session token. The local session has
    /// already been cleared.
    #[error("session expired, please sign in again")]
    Unauthorized,

    /// Neither the backend nor the embedded catalog has the product.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Neither the backend nor the embedded catalog has the category.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),
}

/// Entry point for catalog reads.
#[derive(Clone)]
pub struct ProductGateway {
    api: Arc<dyn CatalogApi>,
    ctx: NormalizeContext,
}

impl ProductGateway {
    pub fn new(api: impl CatalogApi + 'static, ctx: NormalizeContext) -> Self {
        Self {
            api: Arc::new(api),
            ctx,
        }
    }

    /// Gateway over the HTTP backend.
    pub fn http(client: FetchClient, ctx: NormalizeContext) -> Self {
        Self::new(HttpCatalogApi::new(client), ctx)
    }

    /// Products in `scope`, from the backend when it has any, from the
    /// embedded catalog otherwise.
    pub async fn fetch_products(
        &self,
        scope: ProductScope,
    ) -> Result<Fetched<Vec<Product>>, GatewayError> {
        let category = scope.category_id();
        let ctx = self.context_for(category.as_ref());

        let remote = match &category {
            Some(id) => self.api.products_in_category(id).await,
            None => self.api.products().await,
        };

        let reason = match remote {
            Ok(records) if records.is_empty() => FallbackReason::Empty,
            Ok(records) => match normalize_all(records, &ctx) {
                Some(products) => {
                    tracing::debug!(%scope, count = products.len(), "served from backend");
                    return Ok(Fetched::remote(products));
                }
                None => FallbackReason::Unavailable(FailureKind::Parse),
            },
            Err(e) => unavailable(e)?,
        };

        let products = embedded_products(category.as_ref());
        tracing::warn!(%scope, %reason, count = products.len(), "serving embedded catalog");
        Ok(Fetched::fallback(products, reason))
    }

    /// One product by id.
    pub async fn fetch_product(&self, id: &ProductId) -> Result<Fetched<Product>, GatewayError> {
        let reason = match self.api.product(id).await {
            Ok(record) => match parse_product(record, &self.ctx) {
                Some(product) => return Ok(Fetched::remote(product)),
                None => FallbackReason::Unavailable(FailureKind::Parse),
            },
            Err(e) => unavailable(e)?,
        };

        let product = catalog::product(id)
            .and_then(embedded_product)
            .ok_or_else(|| GatewayError::ProductNotFound(id.clone()))?;
        tracing::warn!(product = %id, %reason, "serving embedded product");
        Ok(Fetched::fallback(product, reason))
    }

    /// All categories. Backend categories that match a store category get
    /// its item list.
    pub async fn fetch_categories(&self) -> Result<Fetched<Vec<Category>>, GatewayError> {
        let reason = match self.api.categories().await {
            Ok(records) if records.is_empty() => FallbackReason::Empty,
            Ok(records) => match parse_all::<RemoteCategory>(records, "category") {
                Some(remote) => {
                    let categories = remote
                        .into_iter()
                        .map(|c| self.category_from_remote(c))
                        .collect();
                    return Ok(Fetched::remote(categories));
                }
                None => FallbackReason::Unavailable(FailureKind::Parse),
            },
            Err(e) => unavailable(e)?,
        };

        tracing::warn!(%reason, "serving embedded categories");
        Ok(Fetched::fallback(catalog::categories(), reason))
    }

    /// A category with its products, fetched concurrently.
    ///
    /// Served from the backend only when both the category and a non-empty
    /// product list come back. Otherwise the products are the embedded ones,
    /// and so is the category unless the backend returned it.
    pub async fn fetch_category(
        &self,
        id: &CategoryId,
    ) -> Result<Fetched<CategoryListing>, GatewayError> {
        let (category, products) =
            futures::join!(self.api.category(id), self.api.category_products(id));
        let ctx = self.context_for(Some(id));

        let category = match category {
            Ok(record) => parse_one::<RemoteCategory>(record, "category")
                .map(|c| self.category_from_remote(c))
                .ok_or(FallbackReason::Unavailable(FailureKind::Parse)),
            Err(e) => Err(unavailable(e)?),
        };
        let products = match products {
            Ok(records) if records.is_empty() => Err(FallbackReason::Empty),
            Ok(records) => {
                normalize_all(records, &ctx).ok_or(FallbackReason::Unavailable(FailureKind::Parse))
            }
            Err(e) => Err(unavailable(e)?),
        };

        let (category, products, reason) = match (category, products) {
            (Ok(category), Ok(products)) => {
                return Ok(Fetched::remote(CategoryListing { category, products }));
            }
            (Ok(category), Err(reason)) => (category, embedded_products(Some(id)), reason),
            (Err(reason), products) => {
                let known = StoreCategory::from_id(id)
                    .ok_or_else(|| GatewayError::CategoryNotFound(id.clone()))?;
                let products = products.unwrap_or_else(|_| embedded_products(Some(id)));
                (catalog::category(known), products, reason)
            }
        };

        tracing::warn!(category = %id, %reason, "serving embedded category products");
        Ok(Fetched::fallback(
            CategoryListing { category, products },
            reason,
        ))
    }

    fn context_for(&self, category: Option<&CategoryId>) -> NormalizeContext {
        let reference = category
            .and_then(StoreCategory::from_id)
            .map(|c| CategoryRef {
                id: Some(c.id()),
                name: c.name().to_string(),
            });
        self.ctx.clone().with_category(reference)
    }

    fn category_from_remote(&self, remote: RemoteCategory) -> Category {
        let mut category = normalize_category(remote, &self.ctx);
        if let Some(known) = StoreCategory::from_id(&category.id) {
            category.items = catalog::category_items(known)
                .iter()
                .map(|i| i.to_string())
                .collect();
        }
        category
    }
}

impl fmt::Debug for ProductGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductGateway")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

/// Fallback reason for a failed request. A 401 is surfaced instead.
fn unavailable(error: FetchError) -> Result<FallbackReason, GatewayError> {
    if error.is_unauthorized() {
        return Err(GatewayError::Unauthorized);
    }
    Ok(FallbackReason::Unavailable(error.kind()))
}

fn embedded_products(category: Option<&CategoryId>) -> Vec<Product> {
    catalog::products_in(category)
        .into_iter()
        .filter_map(embedded_product)
        .collect()
}

fn embedded_product(record: &'static StaticProduct) -> Option<Product> {
    let ctx = NormalizeContext::new(record.price.currency, "");
    match normalize(ProductRecord::Static(record), &ctx) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::error!(product = record.id, error = %e, "embedded product is invalid");
            None
        }
    }
}

fn parse_one<T: serde::de::DeserializeOwned>(record: Value, what: &str) -> Option<T> {
    match serde_json::from_value(record) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(error = %e, "dropping unreadable {what} record");
            None
        }
    }
}

/// Parse every record, dropping unreadable ones. `None` when none survive.
fn parse_all<T: serde::de::DeserializeOwned>(records: Vec<Value>, what: &str) -> Option<Vec<T>> {
    let parsed: Vec<T> = records
        .into_iter()
        .filter_map(|record| parse_one(record, what))
        .collect();
    (!parsed.is_empty()).then_some(parsed)
}

fn parse_product(record: Value, ctx: &NormalizeContext) -> Option<Product> {
    let remote = parse_one::<RemoteProduct>(record, "product")?;
    let id = remote.id.clone();
    match normalize(ProductRecord::Remote(remote), ctx) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!(product = %id, error = %e, "dropping product with unreadable price");
            None
        }
    }
}

fn normalize_all(records: Vec<Value>, ctx: &NormalizeContext) -> Option<Vec<Product>> {
    let products: Vec<Product> = records
        .into_iter()
        .filter_map(|record| parse_product(record, ctx))
        .collect();
    (!products.is_empty()).then_some(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_resolution() {
        assert_eq!(ProductScope::All.category_id(), None);
        assert_eq!(
            ProductScope::CategoryName("Protection Products".into()).category_id(),
            Some(CategoryId::from(3u64))
        );
        assert_eq!(
            ProductScope::CategoryName("Gift Cards".into()).category_id(),
            None
        );
        assert_eq!(
            ProductScope::CategoryId(CategoryId::from(99u64)).category_id(),
            Some(CategoryId::from(99u64))
        );
    }

    #[test]
    fn test_source_serialization() {
        let source = Source::Fallback {
            reason: FallbackReason::Unavailable(FailureKind::Timeout),
        };
        assert_eq!(
            serde_json::to_value(source).unwrap(),
            serde_json::json!({ "source": "fallback", "reason": "unavailable", "kind": "timeout" })
        );
        assert_eq!(
            serde_json::to_value(Source::Remote).unwrap(),
            serde_json::json!({ "source": "remote" })
        );
    }

    #[test]
    fn test_embedded_products_normalize() {
        let products = embedded_products(Some(&CategoryId::from(1u64)));
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "Premium Car Shampoo");
        assert_eq!(products[0].price.display_amount(), "2499.00");
        assert!(products.iter().all(|p| p.in_category(&CategoryId::from(1u64))));
    }
}
