//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are opaque sequential numbers assigned by the store. Newtype wrappers
//! keep a brand id from being passed where an audit id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw id value
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the underlying number
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// The id following this one, or `None` once the id space is used up
            pub const fn next(&self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(value) => Some(Self(value)),
                    None => None,
                }
            }

            /// Parse an ID from a string, with or without the display prefix
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                s.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(BrandId, "brd-");
define_id!(AuditId, "aud-");
define_id!(UserId, "usr-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(BrandId::new(7).to_string(), "brd-7");
        assert_eq!(AuditId::new(12).to_string(), "aud-12");
        assert_eq!(UserId::new(1).to_string(), "usr-1");
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        assert_eq!(BrandId::parse("brd-42").unwrap(), BrandId::new(42));
        assert_eq!(BrandId::parse("42").unwrap(), BrandId::new(42));
        assert!(BrandId::parse("brd-x").is_err());
        // A foreign prefix is not stripped
        assert!(BrandId::parse("aud-42").is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_number() {
        let id = AuditId::new(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
        let back: AuditId = serde_json::from_str("9").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_next_and_ordering() {
        let id = BrandId::new(1);
        assert_eq!(id.next(), Some(BrandId::new(2)));
        assert!(id < id.next().unwrap());
        assert_eq!(BrandId::new(u64::MAX).next(), None);
    }
}
