//! Identity provider boundary.
//!
//! The host application authenticates users through whatever service it
//! likes; the state core only needs to hear about the resulting identity
//! transitions. These traits model that boundary as a single-consumer
//! event channel, so the reconciliation logic in
//! [`Storefront`](crate::Storefront) can be tested without a real
//! provider.

use std::sync::Arc;

use clementine_core::IdentityId;

/// Consumer of identity-change notifications.
///
/// One method, one consumer: the provider delivers the signed-in identity
/// (or `None` for signed-out) and the observer reconciles its state.
/// Implementations must tolerate re-delivery of the current identity.
pub trait IdentityObserver: Send + Sync {
    /// Called whenever the signed-in identity appears, disappears, or
    /// changes.
    fn identity_changed(&self, identity: Option<IdentityId>);
}

/// The external identity provider the core subscribes to.
///
/// Implementations adapt the host's auth service. The contract:
///
/// - single consumer - `subscribe` replaces any previous observer;
/// - the current identity is delivered immediately on subscription, so the
///   observer starts from known state rather than waiting for the next
///   transition;
/// - after `unsubscribe`, no further notifications are delivered.
pub trait IdentityProvider {
    /// Register `observer`, replacing any previous one, and deliver the
    /// current identity to it.
    fn subscribe(&self, observer: Arc<dyn IdentityObserver>);

    /// Drop the registered observer.
    fn unsubscribe(&self);
}
