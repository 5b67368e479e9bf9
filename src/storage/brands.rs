//! Brand repository for JSON storage
//!
//! Manages loading and saving brands to brands.json. The file is also the
//! commit record of the store: it carries the id of the last audit record
//! that belongs to a committed unit of work.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::models::{AuditId, Brand, BrandId, BrandStatus};

use super::file_io::{read_json, write_json_atomic};

/// Serializable brand file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BrandData {
    /// Next id handed out by `insert_brand`
    next_id: BrandId,
    /// Watermark: audit records above this id were never committed
    #[serde(default)]
    committed_audit_id: AuditId,
    brands: Vec<Brand>,
}

/// In-memory brand table, cloned into a unit of work for staging
#[derive(Debug, Clone)]
pub(crate) struct BrandTable {
    pub(crate) next_id: BrandId,
    pub(crate) committed_audit_id: AuditId,
    pub(crate) brands: BTreeMap<BrandId, Brand>,
}

impl Default for BrandTable {
    fn default() -> Self {
        Self {
            next_id: BrandId::new(1),
            committed_audit_id: AuditId::default(),
            brands: BTreeMap::new(),
        }
    }
}

impl BrandTable {
    /// Id of the brand holding a registration number, if any
    pub(crate) fn registration_number_owner(&self, number: &str) -> Option<BrandId> {
        self.brands
            .values()
            .find(|b| b.registration_number.as_deref() == Some(number))
            .map(|b| b.id)
    }
}

impl From<BrandData> for BrandTable {
    fn from(data: BrandData) -> Self {
        Self {
            next_id: data.next_id,
            committed_audit_id: data.committed_audit_id,
            brands: data.brands.into_iter().map(|b| (b.id, b)).collect(),
        }
    }
}

impl From<&BrandTable> for BrandData {
    fn from(table: &BrandTable) -> Self {
        Self {
            next_id: table.next_id,
            committed_audit_id: table.committed_audit_id,
            brands: table.brands.values().cloned().collect(),
        }
    }
}

/// Repository for brand persistence
pub struct BrandRepository {
    path: PathBuf,
    data: RwLock<BrandTable>,
}

impl BrandRepository {
    /// Create a new brand repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BrandTable::default()),
        }
    }

    /// Load brands from disk
    ///
    /// Returns false if there is no brand file yet.
    pub fn load(&self) -> Result<bool, RegistryError> {
        let file_data: Option<BrandData> = read_json(&self.path)?;
        let exists = file_data.is_some();
        let table = file_data.map(BrandTable::from).unwrap_or_default();

        let mut data = self.write_lock()?;
        *data = table;

        Ok(exists)
    }

    /// Persist a table as the new commit record
    pub(crate) fn write_table(&self, table: &BrandTable) -> Result<(), RegistryError> {
        write_json_atomic(&self.path, &BrandData::from(table))
    }

    /// Copy of the committed table
    pub(crate) fn table(&self) -> Result<BrandTable, RegistryError> {
        let data = self.data.read().map_err(|e| {
            RegistryError::Persistence(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    pub(crate) fn write_lock(&self) -> Result<RwLockWriteGuard<'_, BrandTable>, RegistryError> {
        self.data.write().map_err(|e| {
            RegistryError::Persistence(format!("Failed to acquire write lock: {}", e))
        })
    }

    fn read<T>(&self, f: impl FnOnce(&BrandTable) -> T) -> Result<T, RegistryError> {
        let data = self.data.read().map_err(|e| {
            RegistryError::Persistence(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(f(&data))
    }

    /// Id of the last committed audit record
    pub fn committed_audit_id(&self) -> Result<AuditId, RegistryError> {
        self.read(|t| t.committed_audit_id)
    }

    /// Get a brand by ID
    pub fn get(&self, id: BrandId) -> Result<Option<Brand>, RegistryError> {
        self.read(|t| t.brands.get(&id).cloned())
    }

    /// Get all brands, ordered by id
    pub fn get_all(&self) -> Result<Vec<Brand>, RegistryError> {
        self.read(|t| t.brands.values().cloned().collect())
    }

    /// Get brands with the given status, ordered by id
    pub fn get_by_status(&self, status: BrandStatus) -> Result<Vec<Brand>, RegistryError> {
        self.filter(|b| b.status == status)
    }

    /// Get brands with exactly this owner
    pub fn get_by_owner(&self, owner: &str) -> Result<Vec<Brand>, RegistryError> {
        self.filter(|b| b.owner == owner)
    }

    /// Get brands whose name contains `query` (case-insensitive)
    pub fn search_by_name(&self, query: &str) -> Result<Vec<Brand>, RegistryError> {
        let query_lower = query.to_lowercase();
        self.filter(|b| b.name.to_lowercase().contains(&query_lower))
    }

    /// Id of the brand holding a registration number, if any
    pub fn registration_number_owner(&self, number: &str) -> Result<Option<BrandId>, RegistryError> {
        self.read(|t| t.registration_number_owner(number))
    }

    /// Count brands
    pub fn count(&self) -> Result<usize, RegistryError> {
        self.read(|t| t.brands.len())
    }

    fn filter(&self, predicate: impl Fn(&Brand) -> bool) -> Result<Vec<Brand>, RegistryError> {
        self.read(|t| {
            t.brands
                .values()
                .filter(|b| predicate(b))
                .cloned()
                .collect()
        })
    }
}
