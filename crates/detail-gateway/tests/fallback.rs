//! Gateway behavior against a scripted catalog backend.

use async_trait::async_trait;
use detail_commerce::catalog::{NormalizeContext, ProductImage, StoreCategory};
use detail_commerce::ids::{CategoryId, ProductId};
use detail_commerce::money::Currency;
use detail_data::{FailureKind, FetchError};
use detail_gateway::{
    CatalogApi, CatalogView, Commit, FallbackReason, FetchState, GatewayError, ProductGateway,
    ProductScope, Source,
};
use serde_json::{json, Value};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Backend whose every endpoint answers the same way.
#[derive(Clone)]
enum Backend {
    Down(FetchError),
    Records(Vec<Value>),
}

struct MockApi {
    backend: Backend,
    category: Option<Value>,
}

impl MockApi {
    fn down(error: FetchError) -> Self {
        Self {
            backend: Backend::Down(error),
            category: None,
        }
    }

    fn records(records: Vec<Value>) -> Self {
        Self {
            backend: Backend::Records(records),
            category: None,
        }
    }

    fn list(&self) -> Result<Vec<Value>, FetchError> {
        match &self.backend {
            Backend::Down(e) => Err(e.clone()),
            Backend::Records(records) => Ok(records.clone()),
        }
    }
}

#[async_trait]
impl CatalogApi for MockApi {
    async fn products(&self) -> Result<Vec<Value>, FetchError> {
        self.list()
    }

    async fn products_in_category(&self, _id: &CategoryId) -> Result<Vec<Value>, FetchError> {
        self.list()
    }

    async fn product(&self, _id: &ProductId) -> Result<Value, FetchError> {
        self.list()?
            .into_iter()
            .next()
            .ok_or(FetchError::Http {
                status: 404,
                message: "Not found".into(),
            })
    }

    async fn categories(&self) -> Result<Vec<Value>, FetchError> {
        self.list()
    }

    async fn category(&self, _id: &CategoryId) -> Result<Value, FetchError> {
        self.list()?;
        self.category.clone().ok_or(FetchError::Http {
            status: 404,
            message: "Not found".into(),
        })
    }

    async fn category_products(&self, _id: &CategoryId) -> Result<Vec<Value>, FetchError> {
        self.list()
    }
}

fn ctx() -> NormalizeContext {
    NormalizeContext::new(Currency::INR, "http://localhost:9090")
}

fn gateway(api: MockApi) -> ProductGateway {
    ProductGateway::new(api, ctx())
}

fn gateway_without_category() -> ProductGateway {
    gateway(MockApi::records(vec![]))
}

fn network_down() -> FetchError {
    FetchError::Network("connection refused".into())
}

#[tokio::test]
async fn error_falls_back_for_every_store_category() {
    let gateway = gateway(MockApi::down(network_down()));

    for category in StoreCategory::ALL {
        let fetched = gateway
            .fetch_products(ProductScope::CategoryName(category.name().into()))
            .await
            .unwrap();
        assert_eq!(
            fetched.source,
            Source::Fallback {
                reason: FallbackReason::Unavailable(FailureKind::Network)
            }
        );
        assert!(!fetched.data.is_empty(), "{category:?} fallback is empty");
        assert!(fetched.data.iter().all(|p| p.in_category(&category.id())));
    }
}

#[tokio::test]
async fn timeout_falls_back_to_whole_catalog() {
    let gateway = gateway(MockApi::down(FetchError::Timeout(
        std::time::Duration::from_secs(10),
    )));

    let fetched = gateway.fetch_products(ProductScope::All).await.unwrap();
    assert_eq!(fetched.data.len(), 9);
    assert_eq!(
        fetched.source,
        Source::Fallback {
            reason: FallbackReason::Unavailable(FailureKind::Timeout)
        }
    );
}

#[tokio::test]
async fn empty_result_triggers_fallback() {
    let gateway = gateway(MockApi::records(vec![]));

    let fetched = gateway
        .fetch_products(ProductScope::CategoryId(CategoryId::from(4u64)))
        .await
        .unwrap();
    assert_eq!(
        fetched.source,
        Source::Fallback {
            reason: FallbackReason::Empty
        }
    );
    let names: Vec<_> = fetched.data.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Leather Conditioner", "Fabric Protector"]);
}

#[tokio::test]
async fn unknown_category_without_embedded_entry_is_empty() {
    let gateway = gateway(MockApi::down(network_down()));

    let fetched = gateway
        .fetch_products(ProductScope::CategoryId(CategoryId::from(99u64)))
        .await
        .unwrap();
    assert!(fetched.is_fallback());
    assert!(fetched.data.is_empty());
}

#[tokio::test]
async fn remote_records_are_normalized() {
    let gateway = gateway(MockApi::records(vec![
        json!({
            "id": 21,
            "prod_name": "Clay Bar Kit",
            "prod_price": 1299,
            "prod_quantity": 0,
            "category": { "categoryId": 1 },
            "imageFilename": "clay.png"
        }),
        json!({ "id": 22, "name": "Broken", "price": "free" }),
    ]));

    let fetched = gateway
        .fetch_products(ProductScope::CategoryName("Car Wash Products".into()))
        .await
        .unwrap();
    assert_eq!(fetched.source, Source::Remote);
    assert_eq!(fetched.data.len(), 1);

    let clay = &fetched.data[0];
    assert_eq!(clay.price.display(), "₹1,299.00");
    assert!(!clay.in_stock);
    assert_eq!(
        clay.image,
        ProductImage::Remote("http://localhost:9090/api/images/clay.png".into())
    );
    assert_eq!(
        clay.category.as_ref().map(|c| c.name.as_str()),
        Some("Car Wash Products")
    );
}

#[tokio::test]
async fn all_unreadable_records_fall_back() {
    let gateway = gateway(MockApi::records(vec![json!({ "nope": true })]));

    let fetched = gateway.fetch_products(ProductScope::All).await.unwrap();
    assert_eq!(
        fetched.source,
        Source::Fallback {
            reason: FallbackReason::Unavailable(FailureKind::Parse)
        }
    );
    assert_eq!(fetched.data.len(), 9);
}

#[tokio::test]
async fn unauthorized_is_surfaced() {
    let gateway = gateway(MockApi::down(FetchError::Unauthorized {
        message: "Token expired".into(),
    }));

    assert_eq!(
        gateway.fetch_products(ProductScope::All).await,
        Err(GatewayError::Unauthorized)
    );
    assert_eq!(
        gateway.fetch_categories().await.map(|f| f.source),
        Err(GatewayError::Unauthorized)
    );
}

#[tokio::test]
async fn single_product_falls_back_or_is_not_found() {
    let gateway = gateway(MockApi::down(FetchError::Server {
        status: 500,
        message: "boom".into(),
    }));

    let wax = gateway
        .fetch_product(&ProductId::from(10u64))
        .await
        .unwrap();
    assert_eq!(wax.data.name, "Carnauba Wax");
    assert!(wax.is_fallback());

    assert_eq!(
        gateway.fetch_product(&ProductId::from(404u64)).await,
        Err(GatewayError::ProductNotFound(ProductId::from(404u64)))
    );
}

#[tokio::test]
async fn categories_fall_back_to_store_categories() {
    let gateway = gateway(MockApi::down(network_down()));

    let fetched = gateway.fetch_categories().await.unwrap();
    assert!(fetched.is_fallback());
    let names: Vec<_> = fetched.data.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Car Wash Products",
            "Detailing Tools",
            "Protection Products",
            "Interior Care"
        ]
    );
}

#[tokio::test]
async fn category_listing_keeps_remote_category() {
    let api = MockApi {
        backend: Backend::Records(vec![]),
        category: Some(json!({ "categoryId": 3, "categoryName": "Protection Products" })),
    };
    let gateway = gateway(api);

    let fetched = gateway
        .fetch_category(&CategoryId::from(3u64))
        .await
        .unwrap();
    assert_eq!(
        fetched.source,
        Source::Fallback {
            reason: FallbackReason::Empty
        }
    );
    assert_eq!(fetched.data.category.items.len(), 4);
    assert_eq!(fetched.data.products.len(), 2);

    let gateway = gateway_without_category();
    assert_eq!(
        gateway
            .fetch_category(&CategoryId::from(42u64))
            .await
            .map(|f| f.source),
        Err(GatewayError::CategoryNotFound(CategoryId::from(42u64)))
    );
}

/// Backend where the first products call waits for a signal.
struct GatedApi {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    inner: MockApi,
}

#[async_trait]
impl CatalogApi for GatedApi {
    async fn products(&self) -> Result<Vec<Value>, FetchError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.products().await
    }

    async fn products_in_category(&self, id: &CategoryId) -> Result<Vec<Value>, FetchError> {
        self.inner.products_in_category(id).await
    }

    async fn product(&self, id: &ProductId) -> Result<Value, FetchError> {
        self.inner.product(id).await
    }

    async fn categories(&self) -> Result<Vec<Value>, FetchError> {
        self.inner.categories().await
    }

    async fn category(&self, id: &CategoryId) -> Result<Value, FetchError> {
        self.inner.category(id).await
    }

    async fn category_products(&self, id: &CategoryId) -> Result<Vec<Value>, FetchError> {
        self.inner.category_products(id).await
    }
}

#[tokio::test]
async fn superseded_fetch_never_overwrites_newer_state() {
    let (release, gate) = oneshot::channel();
    let gateway = ProductGateway::new(
        GatedApi {
            gate: Mutex::new(Some(gate)),
            inner: MockApi::down(network_down()),
        },
        ctx(),
    );
    let view = CatalogView::new();

    // The slow "all products" fetch starts first, the category fetch second.
    // The category fetch finishes first and then releases the slow one.
    let slow = view.load(gateway.fetch_products(ProductScope::All));
    let fast = view.load(async {
        let fetched = gateway
            .fetch_products(ProductScope::CategoryName("Detailing Tools".into()))
            .await;
        let _ = release.send(());
        fetched
    });

    let (slow, fast) = tokio::join!(slow, fast);
    assert_eq!(fast, Ok(Commit::Applied));
    assert_eq!(slow, Ok(Commit::Superseded));

    let shown = view.data().unwrap();
    assert_eq!(shown.len(), 2);
    assert!(shown.iter().all(|p| p.in_category(&CategoryId::from(2u64))));
    assert!(matches!(view.state(), FetchState::Loaded { .. }));
}
