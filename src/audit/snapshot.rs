//! Point-in-time snapshots of a brand
//!
//! A snapshot maps the known brand fields to JSON values. The field set is
//! fixed at compile time by [`BrandField`]; iteration follows declaration
//! order, which is also the order diff fragments are reported in.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Brand, BrandStatus};

/// The brand fields captured in audit snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandField {
    Id,
    Name,
    Description,
    Owner,
    RegistrationNumber,
    Status,
    CreatedBy,
}

impl BrandField {
    /// Every field, in snapshot order
    pub const ALL: [BrandField; 7] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Owner,
        Self::RegistrationNumber,
        Self::Status,
        Self::CreatedBy,
    ];

    /// Key used in serialized snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Owner => "owner",
            Self::RegistrationNumber => "registration_number",
            Self::Status => "status",
            Self::CreatedBy => "created_by",
        }
    }

    /// Parse a serialized key
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }

    /// Read this field from a brand
    pub fn read(&self, brand: &Brand) -> Value {
        match self {
            Self::Id => Value::from(brand.id.value()),
            Self::Name => Value::from(brand.name.clone()),
            Self::Description => optional_text(&brand.description),
            Self::Owner => Value::from(brand.owner.clone()),
            Self::RegistrationNumber => optional_text(&brand.registration_number),
            Self::Status => status_value(brand.status),
            Self::CreatedBy => Value::from(brand.created_by.value()),
        }
    }
}

impl fmt::Display for BrandField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn optional_text(value: &Option<String>) -> Value {
    value.clone().map(Value::from).unwrap_or(Value::Null)
}

/// Status values are stored by canonical name, never by position
fn status_value(status: BrandStatus) -> Value {
    Value::from(status.as_str())
}

/// Field map of a brand at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    fields: BTreeMap<BrandField, Value>,
}

impl Snapshot {
    /// Full snapshot of every known field
    pub fn of(brand: &Brand) -> Self {
        BrandField::ALL
            .into_iter()
            .map(|field| (field, field.read(brand)))
            .collect()
    }

    /// Snapshot holding only a status value
    pub fn status(status: BrandStatus) -> Self {
        std::iter::once((BrandField::Status, status_value(status))).collect()
    }

    /// Value of a field, if captured
    pub fn get(&self, field: BrandField) -> Option<&Value> {
        self.fields.get(&field)
    }

    /// Captured fields in snapshot order
    pub fn iter(&self) -> impl Iterator<Item = (BrandField, &Value)> + '_ {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON object form
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(field, value)| (field.as_str().to_string(), value.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(BrandField, Value)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (BrandField, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                BrandField::parse(&key)
                    .map(|field| (field, value))
                    .ok_or_else(|| de::Error::custom(format!("unknown brand field '{}'", key)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrandId, NewBrand, UserId};
    use serde_json::json;

    fn acme() -> Brand {
        Brand::from_new(
            BrandId::new(4),
            NewBrand::new("Acme", "Jane", UserId::new(1)).with_registration_number("RN-1"),
        )
    }

    #[test]
    fn test_full_snapshot_has_every_field() {
        let snapshot = Snapshot::of(&acme());
        assert_eq!(snapshot.len(), BrandField::ALL.len());
        assert_eq!(snapshot.get(BrandField::Status), Some(&json!("PENDING")));
        assert_eq!(snapshot.get(BrandField::Description), Some(&Value::Null));
        assert_eq!(snapshot.get(BrandField::Id), Some(&json!(4)));
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let snapshot = Snapshot::of(&acme());
        let keys: Vec<_> = snapshot.iter().map(|(field, _)| field).collect();
        assert_eq!(keys, BrandField::ALL.to_vec());
    }

    #[test]
    fn test_status_snapshot_serialization() {
        let snapshot = Snapshot::status(BrandStatus::Registered);
        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"{"status":"REGISTERED"}"#
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let result: Result<Snapshot, _> = serde_json::from_str(r#"{"colour":"red"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_form_round_trips() {
        let snapshot = Snapshot::of(&acme());
        let text = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.to_json()["registration_number"], json!("RN-1"));
    }
}
