//! Identity scope for partitioning persisted state.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::IdentityId;

/// The identity a collection is scoped to: a signed-in user, or anonymous.
///
/// Cart and wishlist snapshots are partitioned by scope in durable storage,
/// so switching identities swaps the visible collection without deleting the
/// other identity's data. The anonymous scope persists under the literal
/// `"null"` namespace, which keeps storage keys stable for guests across
/// sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IdentityScope {
    /// No signed-in user; guest state.
    #[default]
    Anonymous,
    /// A signed-in user.
    User(IdentityId),
}

impl IdentityScope {
    /// The namespace segment used in storage keys for this scope.
    ///
    /// Anonymous state lives under the explicit `"null"` namespace rather
    /// than an absent one, so guest carts survive restarts the same way
    /// signed-in carts do.
    #[must_use]
    pub fn key_segment(&self) -> &str {
        match self {
            Self::Anonymous => "null",
            Self::User(id) => id.as_str(),
        }
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&IdentityId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }

    /// Whether this scope is a signed-in user.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<Option<IdentityId>> for IdentityScope {
    fn from(id: Option<IdentityId>) -> Self {
        id.map_or(Self::Anonymous, Self::User)
    }
}

impl From<IdentityId> for IdentityScope {
    fn from(id: IdentityId) -> Self {
        Self::User(id)
    }
}

impl fmt::Display for IdentityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_segment())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_key_segment() {
        assert_eq!(IdentityScope::Anonymous.key_segment(), "null");
    }

    #[test]
    fn test_user_key_segment() {
        let scope = IdentityScope::User(IdentityId::new("uid-17"));
        assert_eq!(scope.key_segment(), "uid-17");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(IdentityScope::from(None), IdentityScope::Anonymous);
        assert_eq!(
            IdentityScope::from(Some(IdentityId::new("u"))),
            IdentityScope::User(IdentityId::new("u"))
        );
    }

    #[test]
    fn test_identity_accessor() {
        let id = IdentityId::new("uid-17");
        let scope = IdentityScope::User(id.clone());
        assert_eq!(scope.identity(), Some(&id));
        assert_eq!(IdentityScope::Anonymous.identity(), None);
        assert!(scope.is_signed_in());
        assert!(!IdentityScope::Anonymous.is_signed_in());
    }
}
