//! Strongly-typed ID wrappers for all entity types
//!
//! Each entity gets its own newtype so a `PersonId` can never be passed where a
//! `CategoryId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short display prefix for this ID type
            pub const fn prefix() -> &'static str {
                $display_prefix
            }

            /// Check whether a user-typed identifier refers to this ID.
            ///
            /// Accepts the full UUID, the short display form, or a longer
            /// prefix of the UUID (with or without the type prefix).
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim().to_lowercase();
                let identifier = identifier
                    .strip_prefix($display_prefix)
                    .unwrap_or(&identifier);
                identifier.len() >= 8 && self.0.to_string().starts_with(identifier)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(PersonId, "per-");
define_id!(CategoryId, "cat-");
define_id!(TransactionId, "txn-");
