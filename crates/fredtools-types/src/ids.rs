//! Identifier newtypes for FRED records.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Series identifier (e.g. "GNPCA").
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    /// Creates a series identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SeriesId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for SeriesId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Display,
            From,
            Into,
            Serialize,
            Deserialize,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates the identifier from its integer value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }
    };
}

integer_id!(
    /// Release identifier.
    ReleaseId
);

integer_id!(
    /// Category identifier. The root category is `0`.
    CategoryId
);

integer_id!(
    /// Release table element identifier.
    ElementId
);

integer_id!(
    /// Data source identifier.
    SourceId
);
