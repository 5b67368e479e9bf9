//! Brand model
//!
//! The tracked record whose mutations are audited.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BrandId, UserId};
use super::status::BrandStatus;

/// Maximum length of a brand name
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of a description
pub const MAX_DESCRIPTION_LEN: usize = 255;
/// Maximum length of the owner field
pub const MAX_OWNER_LEN: usize = 100;
/// Maximum length of a registration number
pub const MAX_REGISTRATION_NUMBER_LEN: usize = 100;

/// A registered (or pending) brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Unique identifier
    pub id: BrandId,

    /// Brand name
    pub name: String,

    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,

    /// Owner of the brand
    pub owner: String,

    /// Official registration number, unique when present
    #[serde(default)]
    pub registration_number: Option<String>,

    /// Current lifecycle status
    #[serde(default)]
    pub status: BrandStatus,

    /// User that created the brand
    pub created_by: UserId,
}

impl Brand {
    /// Build a brand from a creation request and an assigned id
    pub fn from_new(id: BrandId, new: NewBrand) -> Self {
        Self {
            id,
            name: new.name.trim().to_string(),
            description: normalize_optional(new.description),
            owner: new.owner.trim().to_string(),
            registration_number: normalize_optional(new.registration_number),
            status: new.status.unwrap_or_default(),
            created_by: new.created_by,
        }
    }

    /// Apply every supplied field of a patch
    pub fn apply(&mut self, patch: &BrandPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = normalize_optional(Some(description.clone()));
        }
        if let Some(owner) = &patch.owner {
            self.owner = owner.trim().to_string();
        }
        if let Some(registration_number) = &patch.registration_number {
            self.registration_number = normalize_optional(Some(registration_number.clone()));
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Validate the brand
    pub fn validate(&self) -> Result<(), BrandValidationError> {
        if self.name.trim().is_empty() {
            return Err(BrandValidationError::EmptyName);
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(BrandValidationError::TooLong {
                field: "name",
                len: self.name.chars().count(),
                max: MAX_NAME_LEN,
            });
        }
        if self.owner.trim().is_empty() {
            return Err(BrandValidationError::EmptyOwner);
        }
        if self.owner.chars().count() > MAX_OWNER_LEN {
            return Err(BrandValidationError::TooLong {
                field: "owner",
                len: self.owner.chars().count(),
                max: MAX_OWNER_LEN,
            });
        }
        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(BrandValidationError::TooLong {
                    field: "description",
                    len,
                    max: MAX_DESCRIPTION_LEN,
                });
            }
        }
        if let Some(number) = &self.registration_number {
            let len = number.chars().count();
            if len > MAX_REGISTRATION_NUMBER_LEN {
                return Err(BrandValidationError::TooLong {
                    field: "registration number",
                    len,
                    max: MAX_REGISTRATION_NUMBER_LEN,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.status)
    }
}

/// Trim a free-text optional field; blank becomes absent
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fields supplied when creating a brand
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBrand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: String,
    #[serde(default)]
    pub registration_number: Option<String>,
    /// Initial status; `PENDING` when absent
    #[serde(default)]
    pub status: Option<BrandStatus>,
    pub created_by: UserId,
}

impl NewBrand {
    /// Minimal creation request
    pub fn new(name: impl Into<String>, owner: impl Into<String>, created_by: UserId) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            created_by,
            ..Self::default()
        }
    }

    /// Set the registration number
    pub fn with_registration_number(mut self, number: impl Into<String>) -> Self {
        self.registration_number = Some(number.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set an explicit initial status
    pub fn with_status(mut self, status: BrandStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Partial update: only `Some` fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub status: Option<BrandStatus>,
}

impl BrandPatch {
    /// True if the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.owner.is_none()
            && self.registration_number.is_none()
            && self.status.is_none()
    }
}

/// Validation errors for brands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandValidationError {
    EmptyName,
    EmptyOwner,
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl fmt::Display for BrandValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Brand name cannot be empty"),
            Self::EmptyOwner => write!(f, "Brand owner cannot be empty"),
            Self::TooLong { field, len, max } => {
                write!(f, "Brand {} too long ({} chars, max {})", field, len, max)
            }
        }
    }
}

impl std::error::Error for BrandValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Brand {
        Brand::from_new(
            BrandId::new(1),
            NewBrand::new("Acme", "Jane", UserId::new(1)).with_registration_number("RN-1"),
        )
    }

    #[test]
    fn test_from_new_defaults_to_pending() {
        let brand = acme();
        assert_eq!(brand.status, BrandStatus::Pending);
        assert_eq!(brand.registration_number.as_deref(), Some("RN-1"));
        assert_eq!(brand.description, None);
    }

    #[test]
    fn test_from_new_keeps_explicit_status() {
        let brand = Brand::from_new(
            BrandId::new(2),
            NewBrand::new("Globex", "Hank", UserId::new(1)).with_status(BrandStatus::Registered),
        );
        assert_eq!(brand.status, BrandStatus::Registered);
    }

    #[test]
    fn test_blank_registration_number_is_absent() {
        let brand = Brand::from_new(
            BrandId::new(3),
            NewBrand::new("Initech", "Bill", UserId::new(1)).with_registration_number("   "),
        );
        assert_eq!(brand.registration_number, None);
    }

    #[test]
    fn test_apply_only_supplied_fields() {
        let mut brand = acme();
        brand.apply(&BrandPatch {
            owner: Some("  John ".into()),
            ..BrandPatch::default()
        });
        assert_eq!(brand.owner, "John");
        assert_eq!(brand.name, "Acme");
        assert_eq!(brand.registration_number.as_deref(), Some("RN-1"));
    }

    #[test]
    fn test_validation() {
        let mut brand = acme();
        assert!(brand.validate().is_ok());

        brand.name = " ".into();
        assert_eq!(brand.validate(), Err(BrandValidationError::EmptyName));

        brand.name = "a".repeat(101);
        assert!(matches!(
            brand.validate(),
            Err(BrandValidationError::TooLong { field: "name", .. })
        ));

        brand.name = "Acme".into();
        brand.owner = String::new();
        assert_eq!(brand.validate(), Err(BrandValidationError::EmptyOwner));

        brand.owner = "Jane".into();
        brand.description = Some("d".repeat(256));
        assert!(matches!(
            brand.validate(),
            Err(BrandValidationError::TooLong { field: "description", .. })
        ));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(BrandPatch::default().is_empty());
        assert!(!BrandPatch {
            status: Some(BrandStatus::Expired),
            ..BrandPatch::default()
        }
        .is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(acme().to_string(), "Acme (PENDING)");
    }
}
