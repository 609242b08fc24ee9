//! Cart and line item types.

use crate::cart::{CartPricing, LineItemPricing};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart: line items unique by product id, in insertion order.
///
/// Not deserializable: a stored cart is restored through
/// [`Cart::with_items`] so its invariants are checked.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    /// Cart currency. Every line item is priced in it.
    pub currency: Currency,
    items: Vec<CartLineItem>,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

/// What the cart needs to know about a product to add it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl CartProduct {
    /// Create a product reference with no image or category.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: None,
            category: None,
        }
    }
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.name.clone(),
            price: product.price,
            image: Some(product.image.to_string()),
            category: product.category.as_ref().map(|c| c.name.clone()),
        }
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
            updated_at: current_timestamp(),
        }
    }

    /// Create a cart from a seed list.
    ///
    /// Items with quantity 0, priced in another currency, or repeating an
    /// earlier id are dropped so the seeded cart holds the same invariants
    /// as one built through [`Cart::add_item`].
    pub fn with_items(currency: Currency, seed: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new(currency);
        for item in seed {
            if item.quantity == 0
                || item.unit_price.currency != currency
                || cart.get_item(&item.id).is_some()
            {
                tracing::warn!(id = %item.id, "dropping invalid seeded cart item");
                continue;
            }
            cart.items.push(item);
        }
        cart
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Add one unit of a product.
    ///
    /// Increments the quantity when the product is already in the cart,
    /// otherwise appends a line with quantity 1. Returns the new quantity.
    pub fn add_item(&mut self, product: impl Into<CartProduct>) -> Result<u32, CommerceError> {
        let product = product.into();
        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            self.updated_at = current_timestamp();
            return Ok(existing.quantity);
        }

        self.items.push(CartLineItem {
            id: product.id,
            title: product.title,
            unit_price: product.price,
            quantity: 1,
            image: product.image,
            category: product.category,
        });
        self.updated_at = current_timestamp();
        Ok(1)
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// Returns `false` when the id is not in the cart.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                self.updated_at = current_timestamp();
                true
            }
            None => false,
        }
    }

    /// Remove a line from the cart.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Get a line by product id.
    pub fn get_item(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of unit price times quantity across all lines.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        Ok(self.calculate_pricing()?.subtotal)
    }

    /// Calculate the per-line and total pricing.
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let line_items = self
            .items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    id: item.id.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal = Money::try_sum(line_items.iter().map(|l| &l.total), self.currency)?;

        Ok(CartPricing {
            subtotal,
            item_count: self.total_item_count(),
            line_items,
        })
    }
}

/// One product and its quantity in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product id; unique within the cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Price of one unit.
    pub unit_price: Money,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
    /// Image URL or icon.
    #[serde(default)]
    pub image: Option<String>,
    /// Category name.
    #[serde(default)]
    pub category: Option<String>,
}

impl CartLineItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price.try_multiply(i64::from(self.quantity))
    }
}

fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
