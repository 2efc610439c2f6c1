//! State containers for the storefront.
//!
//! Each store exclusively owns its in-memory collection and writes through
//! the [`PersistenceGateway`](crate::storage::PersistenceGateway) after
//! every mutation. Operations are synchronous transformations applied in
//! call order; nothing here blocks, batches, or reorders.

pub mod cart;
pub mod wishlist;

pub use cart::CartStore;
pub use wishlist::WishlistStore;
