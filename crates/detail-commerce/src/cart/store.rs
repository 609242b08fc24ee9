//! Shared cart state.

use crate::cart::{Cart, CartLineItem, CartProduct};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

/// Read-only view of the cart published to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub total_item_count: u64,
    /// `None` only if the total overflowed.
    pub total_price: Option<Money>,
}

impl CartSnapshot {
    fn of(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_item_count: cart.total_item_count(),
            total_price: cart.total_price().ok(),
        }
    }
}

/// Receives every committed cart state, e.g. to persist it.
pub trait CartSink: Send + Sync {
    fn save(&self, cart: &Cart);
}

/// Handle to the application's single cart.
///
/// Cloning the handle shares the same cart. All mutation goes through the
/// methods below; each one that changes the cart publishes a new
/// [`CartSnapshot`] to subscribers and hands the cart to the sink, if any.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    cart: RwLock<Cart>,
    tx: watch::Sender<CartSnapshot>,
    sink: Option<Box<dyn CartSink>>,
}

impl CartStore {
    /// Create a store around an existing cart.
    pub fn new(cart: Cart) -> Self {
        Self::build(cart, None)
    }

    /// Create a store holding an empty cart.
    pub fn empty(currency: Currency) -> Self {
        Self::new(Cart::new(currency))
    }

    /// Create a store that hands every change to `sink`.
    pub fn with_sink(cart: Cart, sink: impl CartSink + 'static) -> Self {
        Self::build(cart, Some(Box::new(sink)))
    }

    fn build(cart: Cart, sink: Option<Box<dyn CartSink>>) -> Self {
        let (tx, _rx) = watch::channel(CartSnapshot::of(&cart));
        Self {
            inner: Arc::new(Inner {
                cart: RwLock::new(cart),
                tx,
                sink,
            }),
        }
    }

    /// Add one unit of a product. Returns the line's new quantity.
    pub fn add_item(&self, product: impl Into<CartProduct>) -> Result<u32, CommerceError> {
        let mut cart = self.write();
        let quantity = cart.add_item(product)?;
        self.publish(&cart);
        Ok(quantity)
    }

    /// Set a line's quantity; zero removes it. `false` if the id is unknown.
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) -> bool {
        let mut cart = self.write();
        let changed = cart.update_quantity(id, quantity);
        if changed {
            self.publish(&cart);
        }
        changed
    }

    /// Remove a line. `false` if the id is unknown.
    pub fn remove_item(&self, id: &ProductId) -> bool {
        let mut cart = self.write();
        let removed = cart.remove_item(id);
        if removed {
            self.publish(&cart);
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&self) {
        let mut cart = self.write();
        cart.clear();
        self.publish(&cart);
    }

    pub fn total_item_count(&self) -> u64 {
        self.read().total_item_count()
    }

    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.read().total_price()
    }

    /// Current cart state.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::of(&self.read())
    }

    /// Run a read-only closure against the cart.
    pub fn with_cart<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        f(&self.read())
    }

    /// Subscribe to cart changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.tx.subscribe()
    }

    fn publish(&self, cart: &Cart) {
        self.inner.tx.send_replace(CartSnapshot::of(cart));
        if let Some(sink) = &self.inner.sink {
            sink.save(cart);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Cart> {
        self.inner
            .cart
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cart> {
        self.inner
            .cart
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.read())
            .field("has_sink", &self.inner.sink.is_some())
            .finish()
    }
}
