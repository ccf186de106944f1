//! Newtype IDs for type-safe identifiers.
//!
//! Review payloads come from several upstream producers, so IDs are kept as
//! opaque strings: numeric IDs are stringified on the way in.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// An opaque identifier.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Read an ID from an arbitrary JSON value.
            ///
            /// Strings are taken as-is, numbers are stringified and anything
            /// else yields `None`.
            pub fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::String(s) => Some(Self(s.clone())),
                    Value::Number(n) => Some(Self(n.to_string())),
                    _ => None,
                }
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
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

define_id!(ReviewId);
define_id!(ProductId);
define_id!(UserId);
