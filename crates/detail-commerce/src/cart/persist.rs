//! Cart persistence across runs.

use crate::cart::store::CartSink;
use crate::cart::{Cart, CartLineItem, CartStore};
use crate::error::CommerceError;
use crate::money::Currency;
use detail_cache::Cache;
use serde::{Deserialize, Serialize};

/// Storage key of the saved cart.
pub const CART_STORAGE_KEY: &str = "detailGreekCart";

#[derive(Serialize, Deserialize)]
struct StoredCart {
    items: Vec<CartLineItem>,
}

/// Saves the cart under [`CART_STORAGE_KEY`] and restores it at startup.
#[derive(Clone, Debug)]
pub struct CartPersistence {
    cache: Cache,
}

impl CartPersistence {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Load the saved cart. Missing or unreadable data yields an empty cart.
    pub fn load(&self, currency: Currency) -> Cart {
        match self.cache.get::<StoredCart>(CART_STORAGE_KEY) {
            Ok(Some(stored)) => Cart::with_items(currency, stored.items),
            Ok(None) => Cart::new(currency),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable saved cart");
                Cart::new(currency)
            }
        }
    }

    /// Write the cart to storage.
    pub fn persist(&self, cart: &Cart) -> Result<(), CommerceError> {
        let stored = StoredCart {
            items: cart.items().to_vec(),
        };
        self.cache.set(CART_STORAGE_KEY, &stored)?;
        Ok(())
    }

    /// Load the saved cart into a store that saves every change.
    pub fn into_store(self, currency: Currency) -> CartStore {
        let cart = self.load(currency);
        CartStore::with_sink(cart, self)
    }
}

impl CartSink for CartPersistence {
    fn save(&self, cart: &Cart) {
        if let Err(e) = self.persist(cart) {
            tracing::error!(error = %e, "failed to save cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartProduct;
    use crate::ids::ProductId;
    use crate::money::Money;

    fn wax() -> CartProduct {
        CartProduct::new(10u64, "Carnauba Wax", Money::new(459_900, Currency::INR))
    }

    #[test]
    fn test_store_changes_survive_restart() {
        let cache = Cache::in_memory();

        let store = CartPersistence::new(cache.clone()).into_store(Currency::INR);
        store.add_item(wax()).unwrap();
        store.add_item(wax()).unwrap();

        let restored = CartPersistence::new(cache).into_store(Currency::INR);
        assert_eq!(restored.total_item_count(), 2);
        assert_eq!(
            restored.total_price().unwrap(),
            Money::new(919_800, Currency::INR)
        );
    }

    #[test]
    fn test_removal_is_persisted() {
        let cache = Cache::in_memory();
        let store = CartPersistence::new(cache.clone()).into_store(Currency::INR);
        store.add_item(wax()).unwrap();
        store.remove_item(&ProductId::from(10u64));

        let cart = CartPersistence::new(cache).load(Currency::INR);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stored_lines_are_checked_on_restore() {
        let cache = Cache::in_memory();
        let line = |id: u64, quantity: u32| {
            serde_json::json!({
                "id": id.to_string(),
                "title": "Carnauba Wax",
                "unit_price": { "amount_cents": 459_900, "currency": "INR" },
                "quantity": quantity,
            })
        };
        cache
            .set(
                CART_STORAGE_KEY,
                &serde_json::json!({ "items": [line(10, 2), line(10, 5), line(11, 0)] }),
            )
            .unwrap();

        let cart = CartPersistence::new(cache).load(Currency::INR);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_corrupt_cart_loads_empty() {
        let cache = Cache::in_memory();
        cache.set(CART_STORAGE_KEY, &"garbage").unwrap();
        assert!(CartPersistence::new(cache).load(Currency::INR).is_empty());
    }
}
