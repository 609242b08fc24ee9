//! Catalog module.
//!
//! Contains product and category types, the mapping that turns backend and
//! embedded records into them, and listing helpers.

mod category;
mod listing;
mod normalize;
mod product;

pub use category::{
    category_emoji, product_emoji, Category, CategoryRef, RemoteCategory, StoreCategory,
};
pub use listing::{arrange, ProductFilter, SortOption};
pub use normalize::{
    normalize, normalize_category, static_category, NormalizeContext, ProductRecord,
};
pub use product::{
    Product, ProductImage, RemoteCategoryRef, RemotePrice, RemoteProduct, Specification,
    StaticProduct,
};
