//! Mapping from every product source into the canonical [`Product`].

use crate::catalog::category::{category_emoji, product_emoji};
use crate::catalog::{
    Category, CategoryRef, Product, ProductImage, RemoteCategory, RemotePrice, RemoteProduct,
    Specification, StaticProduct, StoreCategory,
};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money, SeparatorPolicy};

/// A product from either source.
#[derive(Debug, Clone)]
pub enum ProductRecord {
    Remote(RemoteProduct),
    Static(&'static StaticProduct),
}

/// Settings the mapping needs beyond the record itself.
#[derive(Debug, Clone)]
pub struct NormalizeContext {
    /// Currency of backend prices.
    pub currency: Currency,
    /// Host prefixed to relative backend image paths, e.g. `http://localhost:9090`.
    pub image_host: String,
    /// Category the records were requested for, used when a backend
    /// record does not name one.
    pub category: Option<CategoryRef>,
}

impl NormalizeContext {
    pub fn new(currency: Currency, image_host: impl Into<String>) -> Self {
        Self {
            currency,
            image_host: image_host.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<CategoryRef>) -> Self {
        self.category = category;
        self
    }
}

/// Map a record into a [`Product`].
///
/// Backend records get relative image paths prefixed with the image host,
/// an emoji when they have no image, and a rating and review count derived
/// from the id when they carry none. Fails only on an unreadable price.
pub fn normalize(record: ProductRecord, ctx: &NormalizeContext) -> Result<Product, CommerceError> {
    match record {
        ProductRecord::Remote(remote) => normalize_remote(remote, ctx),
        ProductRecord::Static(record) => Ok(normalize_static(record)),
    }
}

fn normalize_remote(
    remote: RemoteProduct,
    ctx: &NormalizeContext,
) -> Result<Product, CommerceError> {
    let price = remote_price(&remote.price, ctx.currency)?;
    let original_price = match &remote.original_price {
        Some(original) => Some(remote_price(original, ctx.currency)?),
        None => None,
    };

    let category = match &remote.category {
        Some(reference) => reference.name().map(|name| CategoryRef {
            id: reference.id(),
            name,
        }),
        None => None,
    }
    .or_else(|| ctx.category.clone());

    let image = remote_image(&remote, &ctx.image_host).unwrap_or_else(|| {
        let icon = match &category {
            Some(CategoryRef { id: Some(id), .. }) => category_emoji(Some(id)),
            _ => product_emoji(&remote.id),
        };
        ProductImage::Icon(icon.to_string())
    });

    let stock = remote.quantity.map(|q| q.clamp(0, i64::from(u32::MAX)) as u32);
    let in_stock = remote
        .in_stock
        .unwrap_or_else(|| stock.map_or(true, |s| s > 0));

    let (rating, reviews) = match (remote.rating, remote.reviews) {
        (Some(rating), Some(reviews)) => (rating, reviews),
        (rating, reviews) => {
            let (synth_rating, synth_reviews) = synthesized_rating(&remote.id);
            (rating.unwrap_or(synth_rating), reviews.unwrap_or(synth_reviews))
        }
    };

    Ok(Product {
        id: remote.id,
        name: remote.name.trim().to_string(),
        description: remote.description.unwrap_or_default(),
        detailed_description: None,
        price,
        original_price,
        stock,
        in_stock,
        image,
        category,
        features: Vec::new(),
        specifications: Vec::new(),
        benefits: Vec::new(),
        usage: None,
        rating,
        reviews,
        featured: remote.featured.unwrap_or(false),
    })
}

fn normalize_static(record: &StaticProduct) -> Product {
    let id = ProductId::from(record.id);
    let image = ProductImage::Icon(product_emoji(&id).to_string());
    Product {
        id,
        name: record.name.to_string(),
        description: record.description.to_string(),
        detailed_description: Some(record.detailed_description.to_string()),
        price: record.price,
        original_price: None,
        stock: None,
        in_stock: true,
        image,
        category: Some(CategoryRef {
            id: Some(record.category.id()),
            name: record.category.name().to_string(),
        }),
        features: record.features.iter().map(|f| f.to_string()).collect(),
        specifications: record
            .specifications
            .iter()
            .map(|(name, value)| Specification {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
        benefits: record.benefits.iter().map(|b| b.to_string()).collect(),
        usage: Some(record.usage.to_string()),
        rating: record.rating,
        reviews: record.reviews,
        featured: false,
    }
}

/// Map a backend category, filling presentation defaults from the store
/// categories.
pub fn normalize_category(remote: RemoteCategory, ctx: &NormalizeContext) -> Category {
    let known = StoreCategory::from_id(&remote.id);
    let image_url = remote
        .image_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .map(|url| prefix_host(url, &ctx.image_host));
    Category {
        description: remote
            .description
            .filter(|d| !d.trim().is_empty())
            .or_else(|| known.map(|c| c.description().to_string()))
            .unwrap_or_default(),
        fallback_image: fallback_image(known),
        items: Vec::new(),
        id: remote.id,
        name: remote.name,
        image_url,
    }
}

/// The embedded record of a store category.
pub fn static_category(category: StoreCategory, items: Vec<String>) -> Category {
    Category {
        id: category.id(),
        name: category.name().to_string(),
        description: category.description().to_string(),
        image_url: None,
        fallback_image: category.fallback_image().to_string(),
        items,
    }
}

fn fallback_image(known: Option<StoreCategory>) -> String {
    known
        .map(|c| c.fallback_image())
        .unwrap_or("assets/categories/default.jpg")
        .to_string()
}

fn remote_price(price: &RemotePrice, currency: Currency) -> Result<Money, CommerceError> {
    match price {
        RemotePrice::Amount(amount) if amount.is_finite() && *amount >= 0.0 => {
            Ok(Money::from_decimal(*amount, currency))
        }
        RemotePrice::Amount(amount) => Err(CommerceError::InvalidPrice {
            input: amount.to_string(),
            reason: "not a non-negative amount".to_string(),
        }),
        RemotePrice::Text(text) => Money::parse(text, currency, SeparatorPolicy::Grouped),
    }
}

fn remote_image(remote: &RemoteProduct, host: &str) -> Option<ProductImage> {
    let non_empty = |s: &Option<String>| s.clone().filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(&remote.image_url) {
        return Some(ProductImage::Remote(prefix_host(&url, host)));
    }
    if let Some(filename) = non_empty(&remote.image_filename) {
        return Some(ProductImage::Remote(format!(
            "{}/api/images/{}",
            host.trim_end_matches('/'),
            filename.trim_start_matches('/')
        )));
    }
    non_empty(&remote.image).map(|url| ProductImage::Remote(prefix_host(&url, host)))
}

fn prefix_host(url: &str, host: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Stable stand-in rating (4.0 to 4.9) and review count (20 to 199).
fn synthesized_rating(id: &ProductId) -> (f32, u32) {
    let hash = id
        .as_str()
        .bytes()
        .fold(0x811c_9dc5_u32, |h, b| (h ^ u32::from(b)).wrapping_mul(0x0100_0193));
    let rating = 4.0 + (hash % 10) as f32 / 10.0;
    let reviews = 20 + (hash / 10) % 180;
    (rating, reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RemoteCategoryRef;
    use crate::ids::CategoryId;

    const HOST: &str = "http://localhost:9090";

    static SHAMPOO: StaticProduct = StaticProduct {
        id: 1,
        category: StoreCategory::CarWash,
        name: "Premium Car Shampoo",
        price: Money::new(249_900, Currency::INR),
        description: "pH-balanced formula",
        detailed_description: "Long form",
        features: &["pH Balanced", "Biodegradable"],
        specifications: &[("Volume", "500ml"), ("pH Level", "Neutral (7.0)")],
        benefits: &["Safe on wax"],
        usage: "Dilute and wash",
        rating: 4.8,
        reviews: 124,
    };

    fn ctx() -> NormalizeContext {
        NormalizeContext::new(Currency::INR, HOST)
    }

    fn remote(json: serde_json::Value) -> RemoteProduct {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_static_record() {
        let product = normalize(ProductRecord::Static(&SHAMPOO), &ctx()).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price.display(), "\u{20b9}2,499.00");
        assert_eq!(product.image, ProductImage::Icon("\u{1f9f4}".to_string()));
        assert_eq!(product.category.unwrap().name, "Car Wash Products");
        assert_eq!(product.specifications[1].name, "pH Level");
        assert_eq!(product.rating, 4.8);
        assert!(product.in_stock);
    }

    #[test]
    fn test_remote_relative_image_is_prefixed() {
        let product = normalize(
            ProductRecord::Remote(remote(serde_json::json!({
                "id": 5, "name": " Microfiber Towel Set ", "price": 2999.0,
                "imageUrl": "/api/images/towel.png", "rating": 4.9, "reviews": 156
            }))),
            &ctx(),
        )
        .unwrap();
        assert_eq!(product.name, "Microfiber Towel Set");
        assert_eq!(
            product.image,
            ProductImage::Remote("http://localhost:9090/api/images/towel.png".to_string())
        );
        assert_eq!(product.price.amount_cents, 299_900);
        assert_eq!((product.rating, product.reviews), (4.9, 156));
    }

    #[test]
    fn test_remote_image_filename_and_absolute_url() {
        let from_filename = normalize(
            ProductRecord::Remote(remote(serde_json::json!({
                "id": 5, "name": "Towels", "price": 10, "imageFilename": "towel.png"
            }))),
            &ctx(),
        )
        .unwrap();
        assert_eq!(
            from_filename.image.to_string(),
            "http://localhost:9090/api/images/towel.png"
        );

        let absolute = normalize(
            ProductRecord::Remote(remote(serde_json::json!({
                "id": 5, "name": "Towels", "price": 10,
                "image": "https://cdn.example.com/towel.png"
            }))),
            &ctx(),
        )
        .unwrap();
        assert_eq!(absolute.image.to_string(), "https://cdn.example.com/towel.png");
    }

    #[test]
    fn test_remote_missing_image_gets_emoji() {
        let with_category = normalize(
            ProductRecord::Remote(remote(serde_json::json!({
                "id": 42, "name": "Clay Bar", "price": 10, "category": "Detailing Tools"
            }))),
            &ctx(),
        )
        .unwrap();
        assert_eq!(with_category.image, ProductImage::Icon("\u{1f6e0}\u{fe0f}".to_string()));

        let without_category = normalize(
            ProductRecord::Remote(remote(serde_json::json!({
                "id": 9, "name": "Glaze", "price": 10, "imageUrl": "  "
            }))),
            &ctx(),
        )
        .unwrap();
        assert_eq!(without_category.image, ProductImage::Icon("\u{2728}".to_string()));
    }

    #[test]
    fn test_synthesized_rating_is_stable() {
        let record = remote(serde_json::json!({ "id": "abc", "name": "X", "price": 1 }));
        let first = normalize(ProductRecord::Remote(record.clone()), &ctx()).unwrap();
        let second = normalize(ProductRecord::Remote(record), &ctx()).unwrap();

        assert_eq!(first.rating, second.rating);
        assert_eq!(first.reviews, second.reviews);
        assert!((4.0..5.0).contains(&first.rating));
        assert!((20..200).contains(&first.reviews));
    }

    #[test]
    fn test_scope_category_fills_missing_category() {
        let scope = CategoryRef {
            id: Some(StoreCategory::Protection.id()),
            name: "Protection Products".to_string(),
        };
        let product = normalize(
            ProductRecord::Remote(remote(
                serde_json::json!({ "id": 9, "name": "Coat", "price": 1 }),
            )),
            &ctx().with_category(Some(scope.clone())),
        )
        .unwrap();
        assert_eq!(product.category, Some(scope));
    }

    #[test]
    fn test_stock_drives_in_stock() {
        let sold_out = normalize(
            ProductRecord::Remote(remote(serde_json::json!({
                "id": 1, "name": "X", "price": 1, "prod_quantity": 0
            }))),
            &ctx(),
        )
        .unwrap();
        assert_eq!(sold_out.stock, Some(0));
        assert!(!sold_out.in_stock);
    }

    #[test]
    fn test_text_price_and_bad_price() {
        let mut record =
            remote(serde_json::json!({ "id": 1, "name": "X", "price": "\u{20b9}1,699" }));
        let product = normalize(ProductRecord::Remote(record.clone()), &ctx()).unwrap();
        assert_eq!(product.price.amount_cents, 169_900);

        record.price = RemotePrice::Amount(-1.0);
        assert!(normalize(ProductRecord::Remote(record), &ctx()).is_err());
    }

    #[test]
    fn test_category_object_reference() {
        let mut record = remote(serde_json::json!({ "id": 1, "name": "X", "price": 1 }));
        record.category = Some(RemoteCategoryRef::Object {
            id: Some(CategoryId::from(3u64)),
            name: None,
        });
        let product = normalize(ProductRecord::Remote(record), &ctx()).unwrap();
        let category = product.category.unwrap();
        assert_eq!(category.name, "Protection Products");
        assert_eq!(category.id, Some(CategoryId::from(3u64)));
    }

    #[test]
    fn test_remote_category_defaults() {
        let remote: RemoteCategory = serde_json::from_value(serde_json::json!({
            "categoryId": 2, "name": "Detailing Tools", "image": "/api/images/tools.png"
        }))
        .unwrap();
        let category = normalize_category(remote, &ctx());
        assert_eq!(category.description, StoreCategory::DetailingTools.description());
        assert_eq!(category.image(), "http://localhost:9090/api/images/tools.png");
        assert_eq!(category.fallback_image, "assets/categories/detailing-tools.jpg");
    }
}
