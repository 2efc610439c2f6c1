//! Clementine Storefront state library.
//!
//! The client-side state core for a storefront UI: an ordered cart, a
//! per-identity wishlist, and the durable per-identity snapshots backing
//! both. UI layers dispatch intents into [`Storefront`] and read derived
//! values (subtotal, counts, membership) back out; an identity provider
//! delivers sign-in/sign-out notifications that the storefront reconciles
//! into deterministic store transitions.
//!
//! # Known limitation
//!
//! Concurrent writers in separate runtimes (e.g., two browser tabs) sharing
//! one storage namespace are not reconciled: the last writer wins.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod state;
pub mod storage;
pub mod stores;

pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use state::Storefront;
