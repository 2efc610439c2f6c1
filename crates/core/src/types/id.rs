//! Newtype ids for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe id wrappers that prevent
//! accidentally mixing ids from different entity types.

/// Macro to define a type-safe id wrapper.
///
/// Product and identity ids are opaque strings handed to us by external
/// providers (the product catalog and the identity provider respectively);
/// we never parse or interpret them. The wrapper gives each id a distinct
/// type with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use clementine_core::define_id;
/// define_id!(ProductId);
/// define_id!(IdentityId);
///
/// let product = ProductId::new("prod-81");
/// let identity = IdentityId::new("uid-3fk2");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = identity;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a provider-supplied value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity ids
define_id!(ProductId);
define_id!(IdentityId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_roundtrip() {
        let id = ProductId::new("prod-42");
        assert_eq!(id.as_str(), "prod-42");
        assert_eq!(id.to_string(), "prod-42");
        assert_eq!(String::from(id), "prod-42");
    }

    #[test]
    fn test_serde_transparent() {
        let id = IdentityId::new("uid-9");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"uid-9\"");

        let parsed: IdentityId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_equality_and_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ProductId::new("a"));
        set.insert(ProductId::new("a"));
        set.insert(ProductId::new("b"));
        assert_eq!(set.len(), 2);
    }
}
