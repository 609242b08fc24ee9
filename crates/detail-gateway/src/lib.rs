//! Product data gateway for the DetailGreek storefront.
//!
//! Reads products and categories from the backend and serves the embedded
//! catalog when the backend fails or has nothing, tagging every result with
//! its [`Source`]. Only an expired session is reported as an error.
//!
//! ```rust,ignore
//! let gateway = ProductGateway::http(client, NormalizeContext::new(Currency::INR, host));
//! let fetched = gateway
//!     .fetch_products(ProductScope::CategoryName("Interior Care".into()))
//!     .await?;
//! if fetched.is_fallback() {
//!     println!("showing offline catalog");
//! }
//! ```

mod api;
pub mod catalog;
mod gateway;
mod view;

pub use api::{CatalogApi, HttpCatalogApi};
pub use gateway::{
    CategoryListing, FallbackReason, Fetched, GatewayError, ProductGateway, ProductScope, Source,
};
pub use view::{CatalogView, Commit, FetchState, RequestToken};
