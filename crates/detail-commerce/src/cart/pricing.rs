//! Cart pricing calculations.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// Sum of quantities.
    pub item_count: u64,
    /// Per-line breakdown, in cart order.
    pub line_items: Vec<LineItemPricing>,
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub id: ProductId,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price * quantity
    pub total: Money,
}
