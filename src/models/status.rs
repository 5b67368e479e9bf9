//! Brand status lifecycle
//!
//! Status values and the pluggable policy deciding which transitions are
//! permitted. The default policy allows every transition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration status of a brand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrandStatus {
    /// Application filed, not yet decided
    #[default]
    Pending,
    /// Registration granted
    Registered,
    /// Registration refused
    Rejected,
    /// Registration lapsed
    Expired,
    /// Withdrawn by the owner
    Cancelled,
}

impl BrandStatus {
    /// Every status, in lifecycle order
    pub const ALL: [BrandStatus; 5] = [
        Self::Pending,
        Self::Registered,
        Self::Rejected,
        Self::Expired,
        Self::Cancelled,
    ];

    /// Canonical string form, as stored in audit snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Registered => "REGISTERED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parse status from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "REGISTERED" => Some(Self::Registered),
            "REJECTED" => Some(Self::Rejected),
            "EXPIRED" => Some(Self::Expired),
            "CANCELLED" | "CANCELED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BrandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a brand may move from one status to another
pub trait TransitionPolicy: Send + Sync {
    /// Returns true if `from -> to` is permitted
    fn allowed(&self, from: BrandStatus, to: BrandStatus) -> bool;
}

/// Policy that permits any status to replace any other
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllTransitions;

impl TransitionPolicy for AllowAllTransitions {
    fn allowed(&self, _from: BrandStatus, _to: BrandStatus) -> bool {
        true
    }
}

impl<F> TransitionPolicy for F
where
    F: Fn(BrandStatus, BrandStatus) -> bool + Send + Sync,
{
    fn allowed(&self, from: BrandStatus, to: BrandStatus) -> bool {
        self(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(BrandStatus::default(), BrandStatus::Pending);
    }

    #[test]
    fn test_canonical_serialization() {
        assert_eq!(
            serde_json::to_string(&BrandStatus::Registered).unwrap(),
            "\"REGISTERED\""
        );
        let status: BrandStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, BrandStatus::Cancelled);
    }

    #[test]
    fn test_parse() {
        assert_eq!(BrandStatus::parse("registered"), Some(BrandStatus::Registered));
        assert_eq!(BrandStatus::parse(" Expired "), Some(BrandStatus::Expired));
        assert_eq!(BrandStatus::parse("canceled"), Some(BrandStatus::Cancelled));
        assert_eq!(BrandStatus::parse("approved"), None);
    }

    #[test]
    fn test_display_matches_as_str() {
        for status in BrandStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_allow_all_permits_everything() {
        let policy = AllowAllTransitions;
        for from in BrandStatus::ALL {
            for to in BrandStatus::ALL {
                assert!(policy.allowed(from, to));
            }
        }
    }

    #[test]
    fn test_closure_policy() {
        let policy = |from: BrandStatus, _to: BrandStatus| from == BrandStatus::Pending;
        assert!(policy.allowed(BrandStatus::Pending, BrandStatus::Registered));
        assert!(!policy.allowed(BrandStatus::Rejected, BrandStatus::Registered));
    }
}
