//! Wishlist store: the saved-product set for the signed-in identity.

use clementine_core::{IdentityId, IdentityScope, ProductId};

use crate::models::{ProductSnapshot, WishlistEntry};
use crate::storage::{CollectionKind, PersistenceGateway};

/// Holds the wishlist for the signed-in identity.
///
/// Unlike the cart, the wishlist requires a signed-in identity: it starts
/// uninitialized, becomes ready when [`Self::initialize`] binds an identity
/// and loads its snapshot, and returns to uninitialized on [`Self::clear`].
/// Every identity transition passes through one of those two operations, so
/// membership checks never reflect another identity's saved items.
///
/// Mutations while uninitialized are guarded no-ops.
#[derive(Debug)]
pub struct WishlistStore {
    items: Vec<WishlistEntry>,
    identity: Option<IdentityId>,
    gateway: PersistenceGateway,
}

impl WishlistStore {
    /// Create an uninitialized store.
    #[must_use]
    pub const fn new(gateway: PersistenceGateway) -> Self {
        Self {
            items: Vec::new(),
            identity: None,
            gateway,
        }
    }

    /// Bind `identity` and load its stored snapshot.
    ///
    /// Replaces whatever was in memory; missing and malformed snapshots
    /// load as an empty set.
    pub fn initialize(&mut self, identity: IdentityId) {
        self.items = self
            .gateway
            .load(CollectionKind::Wishlist, &scope_of(&identity));
        tracing::debug!(
            %identity,
            entries = self.items.len(),
            "Initialized wishlist"
        );
        self.identity = Some(identity);
    }

    /// Save `product` for later.
    ///
    /// A no-op if the product is already saved or the store is
    /// uninitialized.
    pub fn add(&mut self, product: ProductSnapshot) {
        if !self.is_initialized() {
            tracing::debug!(product_id = %product.id, "Wishlist uninitialized; ignoring add");
            return;
        }

        if self.contains(&product.id) {
            return;
        }

        self.items.push(WishlistEntry::from(product));
        self.persist();
    }

    /// Remove the entry for `product_id` if present.
    ///
    /// Persists regardless of whether anything was removed, so the call is
    /// idempotent from the storage's point of view. A no-op while
    /// uninitialized.
    pub fn remove(&mut self, product_id: &ProductId) {
        if !self.is_initialized() {
            tracing::debug!(%product_id, "Wishlist uninitialized; ignoring remove");
            return;
        }

        self.items.retain(|entry| entry.product_id() != product_id);
        self.persist();
    }

    /// Union `incoming` entries into the current set, keyed by product id.
    ///
    /// The local entry wins when both sides have the same product. Used on
    /// sign-in to fold a previously synced snapshot into what the user
    /// saved locally in the meantime. A no-op while uninitialized.
    pub fn merge(&mut self, incoming: Vec<WishlistEntry>) {
        if !self.is_initialized() {
            tracing::debug!("Wishlist uninitialized; ignoring merge");
            return;
        }

        let mut merged = incoming;
        for local in self.items.drain(..) {
            if let Some(slot) = merged
                .iter_mut()
                .find(|entry| entry.product_id() == local.product_id())
            {
                *slot = local;
            } else {
                merged.push(local);
            }
        }

        self.items = merged;
        self.persist();
    }

    /// Empty the wishlist and unbind the identity.
    ///
    /// Deletes the bound identity's storage key; the store returns to the
    /// uninitialized state until the next [`Self::initialize`].
    pub fn clear(&mut self) {
        self.items.clear();

        if let Some(identity) = self.identity.take() {
            self.gateway
                .clear(CollectionKind::Wishlist, &scope_of(&identity));
        }
    }

    /// Whether `product_id` is saved.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items
            .iter()
            .any(|entry| entry.product_id() == product_id)
    }

    /// The saved entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistEntry] {
        &self.items
    }

    /// Number of saved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the wishlist has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The bound identity, if initialized.
    #[must_use]
    pub const fn identity(&self) -> Option<&IdentityId> {
        self.identity.as_ref()
    }

    /// Whether an identity is bound and the snapshot loaded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.identity.is_some()
    }

    fn persist(&self) {
        if let Some(identity) = &self.identity {
            self.gateway
                .save(CollectionKind::Wishlist, &scope_of(identity), &self.items);
        }
    }
}

fn scope_of(identity: &IdentityId) -> IdentityScope {
    IdentityScope::User(identity.clone())
}
