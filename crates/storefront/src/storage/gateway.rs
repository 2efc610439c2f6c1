//! The single component permitted to read and write durable snapshots.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use clementine_core::IdentityScope;

use super::StorageBackend;

/// Which persisted collection a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Cart line items.
    Cart,
    /// Wishlist entries.
    Wishlist,
}

impl CollectionKind {
    /// The key prefix for this collection.
    ///
    /// The wishlist prefix carries a `v1` so a future entry-format change
    /// can migrate by bumping the prefix instead of parsing both shapes.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist_v1",
        }
    }
}

/// Gateway between the stores and the storage backend.
///
/// Serializes collections as JSON arrays under `{prefix}_{identity}` keys.
/// Durability is best-effort: a failed read loads as an empty collection
/// and a failed write is logged, in both cases leaving the caller's
/// in-memory state as the source of truth. Nothing here panics or
/// propagates an error into a store operation.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    backend: Arc<dyn StorageBackend>,
}

impl PersistenceGateway {
    /// Create a gateway over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// The storage key for `kind` scoped to `scope`.
    #[must_use]
    pub fn storage_key(kind: CollectionKind, scope: &IdentityScope) -> String {
        format!("{}_{}", kind.prefix(), scope.key_segment())
    }

    /// Load the stored collection for `(kind, scope)`.
    ///
    /// Missing and malformed snapshots both load as an empty collection;
    /// malformed payloads are logged and left in place for inspection.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, kind: CollectionKind, scope: &IdentityScope) -> Vec<T> {
        let key = Self::storage_key(kind, scope);

        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {key}: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Malformed snapshot under {key}, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Store `items` under `(kind, scope)`.
    ///
    /// An empty collection removes the key instead of storing `[]`, keeping
    /// storage sparse.
    pub fn save<T: Serialize>(&self, kind: CollectionKind, scope: &IdentityScope, items: &[T]) {
        let key = Self::storage_key(kind, scope);

        if items.is_empty() {
            if let Err(e) = self.backend.remove(&key) {
                tracing::error!("Failed to remove empty snapshot {key}: {e}");
            }
            return;
        }

        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to serialize snapshot for {key}: {e}");
                return;
            }
        };

        if let Err(e) = self.backend.set(&key, &raw) {
            tracing::error!("Failed to persist {key}: {e}");
        }
    }

    /// Remove the stored collection for `(kind, scope)` unconditionally.
    pub fn clear(&self, kind: CollectionKind, scope: &IdentityScope) {
        let key = Self::storage_key(kind, scope);
        if let Err(e) = self.backend.remove(&key) {
            tracing::error!("Failed to clear {key}: {e}");
        }
    }

    /// Whether a snapshot exists for `(kind, scope)`.
    ///
    /// Read-only existence probe; tests use this to assert sparseness.
    #[must_use]
    pub fn exists(&self, kind: CollectionKind, scope: &IdentityScope) -> bool {
        let key = Self::storage_key(kind, scope);
        matches!(self.backend.get(&key), Ok(Some(_)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clementine_core::IdentityId;

    use crate::storage::MemoryBackend;

    use super::*;

    fn gateway() -> PersistenceGateway {
        PersistenceGateway::new(Arc::new(MemoryBackend::new()))
    }

    fn user(id: &str) -> IdentityScope {
        IdentityScope::User(IdentityId::new(id))
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(
            PersistenceGateway::storage_key(CollectionKind::Cart, &user("u1")),
            "cart_u1"
        );
        assert_eq!(
            PersistenceGateway::storage_key(CollectionKind::Wishlist, &user("u1")),
            "wishlist_v1_u1"
        );
        assert_eq!(
            PersistenceGateway::storage_key(CollectionKind::Cart, &IdentityScope::Anonymous),
            "cart_null"
        );
    }

    #[test]
    fn test_missing_snapshot_loads_empty() {
        let gateway = gateway();
        let items: Vec<String> = gateway.load(CollectionKind::Cart, &user("u1"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let gateway = gateway();
        let scope = user("u1");

        gateway.save(
            CollectionKind::Cart,
            &scope,
            &["a".to_owned(), "b".to_owned()],
        );
        let items: Vec<String> = gateway.load(CollectionKind::Cart, &scope);
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_snapshot_loads_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("cart_u1", "{not json").unwrap();

        let gateway = PersistenceGateway::new(backend);
        let items: Vec<String> = gateway.load(CollectionKind::Cart, &user("u1"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_empty_save_removes_key() {
        let gateway = gateway();
        let scope = user("u1");

        gateway.save(CollectionKind::Cart, &scope, &["a".to_owned()]);
        assert!(gateway.exists(CollectionKind::Cart, &scope));

        gateway.save::<String>(CollectionKind::Cart, &scope, &[]);
        assert!(!gateway.exists(CollectionKind::Cart, &scope));
    }

    #[test]
    fn test_clear_removes_key() {
        let gateway = gateway();
        let scope = user("u1");

        gateway.save(CollectionKind::Wishlist, &scope, &["a".to_owned()]);
        gateway.clear(CollectionKind::Wishlist, &scope);
        assert!(!gateway.exists(CollectionKind::Wishlist, &scope));
    }

    #[test]
    fn test_scopes_are_isolated() {
        let gateway = gateway();

        gateway.save(CollectionKind::Cart, &user("u1"), &["a".to_owned()]);
        let other: Vec<String> = gateway.load(CollectionKind::Cart, &user("u2"));
        assert!(other.is_empty());
    }
}
