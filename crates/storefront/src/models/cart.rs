//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::ProductId;

use super::product::ProductSnapshot;

/// One product in the cart, with the quantity requested.
///
/// A cart holds at most one line item per distinct product id; adding the
/// same product again increments the existing line's quantity instead of
/// appending a duplicate. Quantity is always at least 1 - removal is a
/// separate operation, never a quantity-zero update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Snapshot of the product when it was added.
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Number of units requested.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item for `quantity` units of `product`.
    ///
    /// Quantities below 1 are coerced up to 1.
    #[must_use]
    pub fn new(product: ProductSnapshot, quantity: u32) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
        }
    }

    /// The id of the product on this line.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.unit_price.line_total(self.quantity)
    }
}
