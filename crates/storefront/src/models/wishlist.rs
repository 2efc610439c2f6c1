//! Saved-for-later entries.

use serde::{Deserialize, Serialize};

use clementine_core::ProductId;

use super::product::ProductSnapshot;

/// One product saved for later.
///
/// Unlike a cart line, an entry carries no quantity; the wishlist is a set
/// of distinct product ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistEntry {
    /// Snapshot of the product when it was saved.
    pub product: ProductSnapshot,
}

impl WishlistEntry {
    /// The id of the saved product.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

impl From<ProductSnapshot> for WishlistEntry {
    fn from(product: ProductSnapshot) -> Self {
        Self { product }
    }
}
