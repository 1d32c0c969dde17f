//! Newtype IDs for type-safe identifiers.
//!
//! Catalog ids are human-readable slugs (e.g. `npk-fertilizer`); order and
//! application ids are generated.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Catalog product identifier (unique slug).
    ProductId
);
define_id!(
    /// Placed order identifier.
    OrderId
);
define_id!(
    /// Nursery partner application identifier.
    ApplicationId
);

impl OrderId {
    pub fn generate() -> Self {
        Self(format!("ord_{}", generate_suffix()))
    }
}

impl ApplicationId {
    pub fn generate() -> Self {
        Self(format!("npa_{}", generate_suffix()))
    }
}

/// Timestamp mixed with a process-wide counter so ids minted in the same
/// nanosecond still differ.
fn generate_suffix() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default() as u64;
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}{:04x}", nanos, counter & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id: ProductId = "neem-oil".into();
        assert_eq!(id.as_str(), "neem-oil");
        assert_eq!(format!("{}", id), "neem-oil");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("ord_"));
        assert!(ApplicationId::generate().as_str().starts_with("npa_"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("bone-meal");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"bone-meal\"");
    }
}
