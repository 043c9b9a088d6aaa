//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UserId` where a `DocumentId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed integer ID wrappers.
macro_rules! typed_id {
    ($name:ident, $inner:ty, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Wraps a raw ID.
            #[must_use]
            pub const fn new(raw: $inner) -> Self {
                Self(raw)
            }

            /// Returns the raw ID.
            #[must_use]
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<$inner> for $name {
            fn from(raw: $inner) -> Self {
                Self(raw)
            }
        }
    };
}

typed_id!(AccountId, i32, "Numeric code of a chart of accounts entry.");
typed_id!(DocumentId, i64, "Sequential number of a document (bill).");
typed_id!(UserId, i64, "Unique identifier for a user.");

impl DocumentId {
    /// Parses a document ID that must be a positive 32-bit integer.
    ///
    /// Returns `None` for anything else, including zero and negative numbers.
    #[must_use]
    pub fn parse_positive(s: &str) -> Option<Self> {
        s.parse::<i32>()
            .ok()
            .filter(|id| *id >= 1)
            .map(|id| Self(i64::from(id)))
    }
}
