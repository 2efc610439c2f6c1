//! Product snapshot taken at the boundary where catalog data enters the core.

use serde::{Deserialize, Serialize};

use clementine_core::{Price, ProductId};

/// Errors that can occur when normalizing provider product data.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ProductDataError {
    /// The provider handed us an item without an id.
    #[error("product id cannot be empty")]
    EmptyProductId,
    /// The provider handed us an item without a title.
    #[error("product title cannot be empty")]
    EmptyTitle,
    /// The provider handed us a negative unit price.
    #[error("unit price cannot be negative: {0}")]
    NegativePrice(rust_decimal::Decimal),
}

/// Display snapshot of a product at the time it was added.
///
/// The catalog provider owns product data; the core never re-fetches it.
/// Whatever the provider returned when the user added the item is what the
/// cart and wishlist keep showing, even if the catalog changes afterwards.
///
/// Loosely shaped provider payloads are normalized here: [`Self::new`] is
/// the single place external product data is validated before it reaches a
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Provider-defined product id.
    pub id: ProductId,
    /// Product title as displayed when added.
    pub title: String,
    /// Unit price as displayed when added.
    pub unit_price: Price,
    /// Primary image reference, if the provider supplied one.
    pub image: Option<String>,
}

impl ProductSnapshot {
    /// Normalize provider product data into a snapshot.
    ///
    /// Titles are trimmed; ids and titles must be non-empty and the unit
    /// price non-negative.
    ///
    /// # Errors
    ///
    /// Returns `ProductDataError` if the id or title is empty or the price
    /// is negative.
    pub fn new(
        id: impl Into<ProductId>,
        title: &str,
        unit_price: Price,
        image: Option<String>,
    ) -> Result<Self, ProductDataError> {
        let id = id.into();
        if id.as_str().is_empty() {
            return Err(ProductDataError::EmptyProductId);
        }

        let title = title.trim();
        if title.is_empty() {
            return Err(ProductDataError::EmptyTitle);
        }

        if unit_price.amount.is_sign_negative() {
            return Err(ProductDataError::NegativePrice(unit_price.amount));
        }

        Ok(Self {
            id,
            title: title.to_owned(),
            unit_price,
            image,
        })
    }
}
