//! Cart store: the ordered collection of line items for the current identity.

use rust_decimal::Decimal;

use clementine_core::{IdentityScope, ProductId};

use crate::models::{LineItem, ProductSnapshot};
use crate::storage::{CollectionKind, PersistenceGateway};

/// Holds the cart for the current identity scope and exposes derived totals.
///
/// The cart operates for guests as well as signed-in users: anonymous state
/// persists under its own namespace and survives restarts. Every mutation
/// writes through to the gateway before returning; an empty cart removes
/// its storage key instead of persisting `[]`.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<LineItem>,
    checkout_ready: bool,
    scope: IdentityScope,
    gateway: PersistenceGateway,
}

impl CartStore {
    /// Create an empty cart bound to the anonymous scope.
    ///
    /// Callers load the stored snapshot explicitly via
    /// [`Self::load_for_identity`]; construction does no I/O.
    #[must_use]
    pub const fn new(gateway: PersistenceGateway) -> Self {
        Self {
            items: Vec::new(),
            checkout_ready: false,
            scope: IdentityScope::Anonymous,
            gateway,
        }
    }

    /// Replace the in-memory cart with the stored snapshot for `scope`.
    ///
    /// Missing and malformed snapshots load as an empty cart. Checkout
    /// readiness is session-local and resets on every scope change.
    pub fn load_for_identity(&mut self, scope: IdentityScope) {
        self.items = self.gateway.load(CollectionKind::Cart, &scope);
        self.scope = scope;
        self.checkout_ready = false;
        tracing::debug!(
            scope = %self.scope,
            lines = self.items.len(),
            "Loaded cart snapshot"
        );
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// If the product is already in the cart its line quantity is
    /// incremented; otherwise a new line is appended. Quantities below 1
    /// are coerced up to 1.
    pub fn add(&mut self, product: ProductSnapshot, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id() == &product.id)
        {
            line.quantity += quantity;
        } else {
            self.items.push(LineItem::new(product, quantity));
        }

        self.persist();
    }

    /// Remove the line for `product_id`; no-op if absent.
    pub fn remove(&mut self, product_id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|line| line.product_id() != product_id);

        if self.items.len() != before {
            self.persist();
        }
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// Quantities below 1 are rejected and leave the cart unchanged; this
    /// is a deliberate floor, not a delete-on-zero - removal goes through
    /// [`Self::remove`]. Absent products are a no-op. Callers must not
    /// assume the update took effect.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity < 1 {
            tracing::debug!(%product_id, quantity, "Rejected quantity update below 1");
            return;
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Mark the cart ready for checkout.
    ///
    /// The flag is read by the checkout flow and never persisted.
    pub fn proceed_to_checkout(&mut self) {
        self.checkout_ready = true;
    }

    /// Whether the cart has been marked ready for checkout.
    #[must_use]
    pub const fn checkout_ready(&self) -> bool {
        self.checkout_ready
    }

    /// The lines currently in the cart, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The identity scope the cart is currently operating under.
    #[must_use]
    pub const fn scope(&self) -> &IdentityScope {
        &self.scope
    }

    /// Write the current snapshot through to the gateway.
    ///
    /// Best-effort: a failed write is logged by the gateway and the
    /// in-memory cart remains the source of truth.
    fn persist(&self) {
        self.gateway
            .save(CollectionKind::Cart, &self.scope, &self.items);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use clementine_core::{CurrencyCode, IdentityId, Price};

    use crate::storage::MemoryBackend;

    use super::*;

    fn snapshot(id: &str, cents: i64) -> ProductSnapshot {
        ProductSnapshot::new(
            id,
            "Item",
            Price::from_cents(cents, CurrencyCode::USD),
            None,
        )
        .unwrap()
    }

    fn store() -> (CartStore, PersistenceGateway) {
        let gateway = PersistenceGateway::new(Arc::new(MemoryBackend::new()));
        (CartStore::new(gateway.clone()), gateway)
    }

    fn user(id: &str) -> IdentityScope {
        IdentityScope::User(IdentityId::new(id))
    }

    #[test]
    fn test_add_merges_existing_line() {
        let (mut cart, _) = store();
        cart.add(snapshot("p1", 100), 1);
        cart.add(snapshot("p1", 100), 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_coerces_zero_quantity() {
        let (mut cart, _) = store();
        cart.add(snapshot("p1", 100), 0);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut cart, _) = store();
        cart.add(snapshot("p1", 100), 1);
        cart.remove(&ProductId::new("p2"));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_quantity_floor() {
        let (mut cart, _) = store();
        cart.add(snapshot("p1", 100), 1);

        cart.update_quantity(&ProductId::new("p1"), 0);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.update_quantity(&ProductId::new("p1"), 5);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let (mut cart, _) = store();
        cart.update_quantity(&ProductId::new("ghost"), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal() {
        let (mut cart, _) = store();
        cart.add(snapshot("p1", 1000), 2);
        cart.add(snapshot("p2", 550), 1);

        assert_eq!(cart.subtotal(), Decimal::new(2550, 2));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_write_through_is_visible_to_fresh_store() {
        let (mut cart, gateway) = store();
        cart.load_for_identity(user("u1"));
        cart.add(snapshot("p1", 100), 2);

        let mut fresh = CartStore::new(gateway);
        fresh.load_for_identity(user("u1"));
        assert_eq!(fresh.items()[0].quantity, 2);
    }

    #[test]
    fn test_identity_isolation() {
        let (mut cart, _) = store();
        cart.load_for_identity(user("u1"));
        cart.add(snapshot("px", 100), 1);

        cart.load_for_identity(user("u2"));
        assert!(cart.is_empty());

        cart.load_for_identity(user("u1"));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].product_id(), &ProductId::new("px"));
    }

    #[test]
    fn test_removing_last_item_removes_storage_key() {
        let (mut cart, gateway) = store();
        cart.load_for_identity(user("u1"));
        cart.add(snapshot("p1", 100), 1);
        assert!(gateway.exists(CollectionKind::Cart, &user("u1")));

        cart.remove(&ProductId::new("p1"));
        assert!(!gateway.exists(CollectionKind::Cart, &user("u1")));
    }

    #[test]
    fn test_anonymous_cart_persists_under_null_namespace() {
        let (mut cart, gateway) = store();
        cart.add(snapshot("p1", 100), 1);

        assert!(gateway.exists(CollectionKind::Cart, &IdentityScope::Anonymous));
    }

    #[test]
    fn test_checkout_ready_resets_on_scope_change() {
        let (mut cart, _) = store();
        cart.add(snapshot("p1", 100), 1);
        cart.proceed_to_checkout();
        assert!(cart.checkout_ready());

        cart.load_for_identity(user("u1"));
        assert!(!cart.checkout_ready());
    }
}
