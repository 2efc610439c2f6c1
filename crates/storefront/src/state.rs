//! Assembled storefront state shared with UI collaborators.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use clementine_core::{IdentityId, IdentityScope};

use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::identity::{IdentityObserver, IdentityProvider};
use crate::storage::PersistenceGateway;
use crate::stores::{CartStore, WishlistStore};

/// The storefront state context handed to the UI root once at startup.
///
/// Owns the cart and wishlist stores and the reconciliation of identity
/// changes into store transitions. Cheaply cloneable via `Arc`; clones
/// share the same stores.
///
/// Lifecycle: construct, [`init`](Self::init) against the host's identity
/// provider, [`teardown`](Self::teardown) when the UI shuts down. There is
/// no import-time state; everything is reachable from this value.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    cart: Mutex<CartStore>,
    wishlist: Mutex<WishlistStore>,
    /// Last identity delivered by the provider, for idempotent
    /// reconciliation. `None` until the first notification.
    last_identity: Mutex<Option<Option<IdentityId>>>,
}

impl Storefront {
    /// Create storefront state over `gateway`.
    ///
    /// The cart starts under the anonymous scope with its stored guest
    /// snapshot loaded; the wishlist stays uninitialized until an identity
    /// signs in.
    #[must_use]
    pub fn new(gateway: PersistenceGateway) -> Self {
        let mut cart = CartStore::new(gateway.clone());
        cart.load_for_identity(IdentityScope::Anonymous);

        Self {
            inner: Arc::new(StorefrontInner {
                cart: Mutex::new(cart),
                wishlist: Mutex::new(WishlistStore::new(gateway)),
                last_identity: Mutex::new(None),
            }),
        }
    }

    /// Create storefront state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured storage backend cannot be
    /// constructed.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        let backend = config.build_backend()?;
        Ok(Self::new(PersistenceGateway::new(backend)))
    }

    /// Subscribe to `provider` for identity-change notifications.
    ///
    /// Call once at startup. The provider delivers the current identity
    /// immediately, which brings both stores in line with whoever is
    /// signed in.
    pub fn init(&self, provider: &dyn IdentityProvider) {
        provider.subscribe(Arc::new(self.clone()));
    }

    /// Unsubscribe from `provider`.
    ///
    /// Call when the UI shuts down; state already in memory stays valid.
    pub fn teardown(&self, provider: &dyn IdentityProvider) {
        provider.unsubscribe();
    }

    /// Access the cart store.
    #[must_use]
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Access the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> MutexGuard<'_, WishlistStore> {
        self.inner
            .wishlist
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityObserver for Storefront {
    /// Reconcile an identity transition into deterministic store
    /// transitions.
    ///
    /// Sign-in initializes the wishlist for the new identity and swaps the
    /// cart to its namespace; sign-out clears the wishlist and returns the
    /// cart to the anonymous namespace. Re-delivery of the current
    /// identity is a no-op, so a chatty provider cannot clear a
    /// just-loaded collection.
    fn identity_changed(&self, identity: Option<IdentityId>) {
        {
            let mut last = self
                .inner
                .last_identity
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            if last.as_ref() == Some(&identity) {
                tracing::debug!(?identity, "Identity unchanged; skipping reconciliation");
                return;
            }
            *last = Some(identity.clone());
        }

        match identity {
            Some(id) => {
                tracing::info!(identity = %id, "Identity signed in; reloading stores");
                self.wishlist().initialize(id.clone());
                self.cart().load_for_identity(IdentityScope::User(id));
            }
            None => {
                tracing::info!("Identity signed out; clearing wishlist");
                self.wishlist().clear();
                self.cart().load_for_identity(IdentityScope::Anonymous);
            }
        }
    }
}
