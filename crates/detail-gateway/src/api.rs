//! Catalog endpoints of the storefront backend.

use async_trait::async_trait;
use detail_commerce::catalog::RemoteCategoryRef;
use detail_commerce::ids::{CategoryId, ProductId};
use detail_data::{FetchClient, FetchError};
use serde_json::Value;

/// Raw catalog records as the backend sends them.
///
/// Records stay untyped here so one malformed entry does not sink the
/// whole listing; the gateway parses them one by one.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products`
    async fn products(&self) -> Result<Vec<Value>, FetchError>;

    /// Products of one category.
    async fn products_in_category(&self, id: &CategoryId) -> Result<Vec<Value>, FetchError>;

    /// `GET /products/{id}`
    async fn product(&self, id: &ProductId) -> Result<Value, FetchError>;

    /// `GET /categories`
    async fn categories(&self) -> Result<Vec<Value>, FetchError>;

    /// `GET /categories/{id}`
    async fn category(&self, id: &CategoryId) -> Result<Value, FetchError>;

    /// `GET /categories/{id}/products`
    async fn category_products(&self, id: &CategoryId) -> Result<Vec<Value>, FetchError>;
}

/// [`CatalogApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: FetchClient,
}

impl HttpCatalogApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn products(&self) -> Result<Vec<Value>, FetchError> {
        self.client.get("/products").send_json().await
    }

    /// `GET /products/category/{id}`, or `GET /products` filtered by category
    /// id when that endpoint fails. A 401 is never retried.
    async fn products_in_category(&self, id: &CategoryId) -> Result<Vec<Value>, FetchError> {
        match self
            .client
            .get(format!("/products/category/{id}"))
            .send_json()
            .await
        {
            Ok(records) => Ok(records),
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                tracing::debug!(
                    category = %id,
                    error = %e,
                    "category endpoint failed, filtering all products"
                );
                let all = self.products().await?;
                Ok(all
                    .into_iter()
                    .filter(|record| record_category(record).as_ref() == Some(id))
                    .collect())
            }
        }
    }

    async fn product(&self, id: &ProductId) -> Result<Value, FetchError> {
        self.client.get(format!("/products/{id}")).send_json().await
    }

    async fn categories(&self) -> Result<Vec<Value>, FetchError> {
        self.client.get("/categories").send_json().await
    }

    async fn category(&self, id: &CategoryId) -> Result<Value, FetchError> {
        self.client.get(format!("/categories/{id}")).send_json().await
    }

    async fn category_products(&self, id: &CategoryId) -> Result<Vec<Value>, FetchError> {
        self.client
            .get(format!("/categories/{id}/products"))
            .send_json()
            .await
    }
}

fn record_category(record: &Value) -> Option<CategoryId> {
    let reference = record.get("category")?;
    serde_json::from_value::<RemoteCategoryRef>(reference.clone())
        .ok()?
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_category() {
        let id = CategoryId::from(2u64);
        assert_eq!(
            record_category(&json!({ "category": { "categoryId": 2 } })),
            Some(id.clone())
        );
        assert_eq!(
            record_category(&json!({ "category": "Detailing Tools" })),
            Some(id)
        );
        assert_eq!(record_category(&json!({ "name": "Mitt" })), None);
    }
}
