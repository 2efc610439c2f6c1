//! Durable per-identity storage for storefront state.
//!
//! # Layout
//!
//! Snapshots are stored as JSON arrays under keys namespaced by collection
//! kind and identity:
//!
//! - `cart_<identity>` - cart line items (`cart_null` for guests)
//! - `wishlist_v1_<identity>` - wishlist entries
//!
//! The [`PersistenceGateway`] is the single writer of durable state; stores
//! own their in-memory collections and call the gateway after each
//! mutation. UI collaborators never touch storage directly.
//!
//! # Backends
//!
//! The gateway writes through a [`StorageBackend`], a minimal string
//! key-value interface with interior mutability:
//!
//! - [`MemoryBackend`] - in-process `HashMap`; tests and ephemeral sessions
//! - [`FileBackend`] - one JSON file per key under a configured directory

pub mod file;
pub mod gateway;
pub mod memory;

pub use file::FileBackend;
pub use gateway::{CollectionKind, PersistenceGateway};
pub use memory::MemoryBackend;

use std::fmt::Debug;

use thiserror::Error;

/// Errors surfaced by storage backends.
///
/// The gateway catches these at its boundary, logs them, and treats the
/// in-memory state as the source of truth; they never propagate into store
/// operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed (missing permissions, disk full, etc.).
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
}

/// A minimal key-value storage interface.
///
/// Methods take `&self`, so implementations use interior mutability (e.g.,
/// a `Mutex`) and can be shared behind an `Arc` between the cart and
/// wishlist gateways of one runtime.
pub trait StorageBackend: Send + Sync + Debug {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write failed; callers treat this as
    /// best-effort and keep their in-memory state.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`.
    ///
    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the removal failed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
