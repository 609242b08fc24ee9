//! Shopping cart module.
//!
//! [`Cart`] is the plain data structure with the cart operations;
//! [`CartStore`] shares one cart across consumers and notifies subscribers
//! after every change.

mod cart;
#[cfg(feature = "storage")]
mod persist;
mod pricing;
mod store;

pub use cart::{Cart, CartLineItem, CartProduct};
#[cfg(feature = "storage")]
pub use persist::{CartPersistence, CART_STORAGE_KEY};
pub use pricing::{CartPricing, LineItemPricing};
pub use store::{CartSink, CartSnapshot, CartStore};
