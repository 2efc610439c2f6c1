//! Unified error handling for the storefront state core.
//!
//! Failures inside a running session degrade to logged no-ops (see the
//! store modules); the error types here surface only at the edges - loading
//! configuration, constructing the storage backend, and normalizing product
//! data handed in by the catalog provider.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::ProductDataError;
use crate::storage::StorageError;

/// Application-level error type for the storefront state core.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration loading or validation failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend construction failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Product data from the catalog provider failed validation.
    #[error("Product data error: {0}")]
    ProductData(#[from] ProductDataError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
