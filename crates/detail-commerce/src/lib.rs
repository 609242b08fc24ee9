//! Storefront domain types and logic for DetailGreek.
//!
//! - **Money**: integer minor units with presentation-only formatting
//! - **Cart**: line items, totals, and the shared [`CartStore`](cart::CartStore)
//! - **Catalog**: products, categories, and the mapping from backend and
//!   embedded records into one canonical [`Product`](catalog::Product)
//!
//! # Example
//!
//! ```rust
//! use detail_commerce::prelude::*;
//!
//! let store = CartStore::empty(Currency::USD);
//! let price = Money::parse("$10.00", Currency::USD, SeparatorPolicy::Grouped).unwrap();
//!
//! store.add_item(CartProduct::new(1u64, "Premium Car Shampoo", price)).unwrap();
//! store.add_item(CartProduct::new(1u64, "Premium Car Shampoo", price)).unwrap();
//! store.update_quantity(&ProductId::from(1u64), 5);
//!
//! assert_eq!(store.total_item_count(), 5);
//! assert_eq!(store.total_price().unwrap().display_amount(), "50.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money, SeparatorPolicy};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, SeparatorPolicy};

    // Catalog
    pub use crate::catalog::{
        normalize, Category, CategoryRef, NormalizeContext, Product, ProductImage, ProductRecord,
        StoreCategory,
    };

    // Cart
    pub use crate::cart::{Cart, CartLineItem, CartProduct, CartSnapshot, CartStore};
}
