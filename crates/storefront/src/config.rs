//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CLEMENTINE_STORAGE` - storage backend: `file` (default) or `memory`
//! - `CLEMENTINE_STORAGE_DIR` - directory for the file backend
//!   (default: `.clementine/storage`)

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::storage::{FileBackend, MemoryBackend, StorageBackend, StorageError};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend the storefront persists through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageChoice {
    /// In-process only; state is lost when the host exits.
    Memory,
    /// One JSON file per snapshot under `dir`.
    File {
        /// Directory holding the snapshot files.
        dir: PathBuf,
    },
}

/// Storefront state configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Durable storage selection.
    pub storage: StorageChoice,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unrecognized
    /// value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage = match get_env_or_default("CLEMENTINE_STORAGE", "file").as_str() {
            "file" => StorageChoice::File {
                dir: PathBuf::from(get_env_or_default(
                    "CLEMENTINE_STORAGE_DIR",
                    ".clementine/storage",
                )),
            },
            "memory" => StorageChoice::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "CLEMENTINE_STORAGE".to_owned(),
                    format!("expected `file` or `memory`, got `{other}`"),
                ));
            }
        };

        Ok(Self { storage })
    }

    /// Construct the configured storage backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file backend's directory cannot be
    /// created.
    pub fn build_backend(&self) -> Result<Arc<dyn StorageBackend>, StorageError> {
        match &self.storage {
            StorageChoice::Memory => Ok(Arc::new(MemoryBackend::new())),
            StorageChoice::File { dir } => Ok(Arc::new(FileBackend::open(dir)?)),
        }
    }
}

/// Get an environment variable, or a default if unset.
fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}
