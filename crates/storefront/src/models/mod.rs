//! Domain models for storefront state.
//!
//! - [`product`] - the normalized product snapshot taken when an item enters
//!   the core
//! - [`cart`] - cart line items
//! - [`wishlist`] - saved-for-later entries

pub mod cart;
pub mod product;
pub mod wishlist;

pub use cart::LineItem;
pub use product::{ProductDataError, ProductSnapshot};
pub use wishlist::WishlistEntry;
