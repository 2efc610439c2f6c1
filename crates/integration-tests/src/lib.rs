//! Integration tests for Clementine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clementine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - cart behavior across identities and restarts
//! - `wishlist_flows` - wishlist set semantics and merge-on-sign-in
//! - `identity_reconciliation` - provider-driven store transitions
//!
//! The harness here assembles a [`Storefront`] over a shared storage
//! backend together with a scripted identity provider, so tests can drive
//! the same sign-in/sign-out flows a real UI would.

use std::sync::{Arc, Mutex, PoisonError};

use clementine_core::{CurrencyCode, IdentityId, Price};
use clementine_storefront::Storefront;
use clementine_storefront::identity::{IdentityObserver, IdentityProvider};
use clementine_storefront::models::ProductSnapshot;
use clementine_storefront::storage::{MemoryBackend, PersistenceGateway, StorageBackend};

/// A scripted identity provider for tests.
///
/// Implements the provider contract: single observer, current identity
/// delivered on subscription, silence after unsubscribe.
#[derive(Default)]
pub struct FakeIdentityProvider {
    observer: Mutex<Option<Arc<dyn IdentityObserver>>>,
    current: Mutex<Option<IdentityId>>,
}

impl FakeIdentityProvider {
    /// Create a provider with no signed-in identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign `identity` in and notify the observer.
    pub fn sign_in(&self, identity: &str) {
        self.set_identity(Some(IdentityId::new(identity)));
    }

    /// Sign the current identity out and notify the observer.
    pub fn sign_out(&self) {
        self.set_identity(None);
    }

    /// Deliver the current identity again without changing it.
    ///
    /// Real providers re-fire on token refresh; reconciliation must
    /// tolerate it.
    pub fn redeliver(&self) {
        let current = self.lock_current().clone();
        self.notify(current);
    }

    fn set_identity(&self, identity: Option<IdentityId>) {
        *self.lock_current() = identity.clone();
        self.notify(identity);
    }

    fn notify(&self, identity: Option<IdentityId>) {
        let observer = self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(observer) = observer {
            observer.identity_changed(identity);
        }
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<IdentityId>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityProvider for FakeIdentityProvider {
    fn subscribe(&self, observer: Arc<dyn IdentityObserver>) {
        let current = self.lock_current().clone();
        observer.identity_changed(current);
        *self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(observer);
    }

    fn unsubscribe(&self) {
        *self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Assembled storefront state plus the collaborators tests drive.
pub struct TestContext {
    pub storefront: Storefront,
    pub provider: FakeIdentityProvider,
    pub gateway: PersistenceGateway,
    /// Raw backend handle, for asserting on stored payloads directly.
    pub backend: Arc<dyn StorageBackend>,
}

impl TestContext {
    /// Build a context over a fresh in-memory backend, subscribed to the
    /// provider with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Build a context over `backend`.
    ///
    /// Sharing one backend between consecutive contexts simulates an app
    /// restart over surviving durable state.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        init_tracing();

        let gateway = PersistenceGateway::new(backend.clone());
        let storefront = Storefront::new(gateway.clone());
        let provider = FakeIdentityProvider::new();
        storefront.init(&provider);

        Self {
            storefront,
            provider,
            gateway,
            backend,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A normalized product snapshot for test fixtures.
///
/// # Panics
///
/// Panics if the fixture data fails normalization; test-only convenience.
#[must_use]
pub fn product(id: &str, title: &str, cents: i64) -> ProductSnapshot {
    ProductSnapshot::new(
        id,
        title,
        Price::from_cents(cents, CurrencyCode::USD),
        None,
    )
    .expect("valid test fixture")
}

/// Initialize test logging once; respects `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
