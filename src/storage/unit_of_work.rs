//! Unit of work over the brand table and the audit log
//!
//! A unit of work holds the storage writer lock for its whole lifetime and
//! stages every change on a private copy of the brand table. Nothing is
//! visible to readers, in memory or on disk, until `commit` succeeds.
//!
//! Commit order:
//!
//! 1. Append the staged audit records to `audit.log` and sync.
//! 2. Atomically rewrite `brands.json` with the new watermark. This is the
//!    commit point.
//! 3. Swap the in-memory state under both repository write locks.
//!
//! If step 2 fails the log is cut back to its previous length. Should that
//! also fail, the records sit past the watermark: storage refuses further
//! units of work until it is reloaded, and the reload drops them.

use std::fmt;
use std::sync::MutexGuard;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::audit::{AuditDraft, AuditRecord};
use crate::error::RegistryError;
use crate::models::{AuditId, Brand, BrandId, NewBrand};

use super::brands::BrandTable;
use super::{Storage, WriterState};

/// Staged changes for one atomic write
pub struct UnitOfWork<'a> {
    storage: &'a Storage,
    writer: MutexGuard<'a, WriterState>,
    table: BrandTable,
    audit: Vec<AuditRecord>,
    next_audit_id: AuditId,
    last_timestamp: Option<DateTime<Utc>>,
    committed: bool,
}

impl<'a> UnitOfWork<'a> {
    pub(super) fn new(
        storage: &'a Storage,
        writer: MutexGuard<'a, WriterState>,
    ) -> Result<Self, RegistryError> {
        let table = storage.brands.table()?;
        let last_audit_id = storage.audit.last_id()?;
        let next_audit_id = last_audit_id
            .next()
            .ok_or_else(|| ids_exhausted(last_audit_id))?;
        let last_timestamp = storage.audit.last_timestamp()?;

        Ok(Self {
            storage,
            writer,
            table,
            audit: Vec::new(),
            next_audit_id,
            last_timestamp,
            committed: false,
        })
    }

    /// A brand as seen inside this unit of work
    pub fn brand(&self, id: BrandId) -> Option<&Brand> {
        self.table.brands.get(&id)
    }

    /// True if another brand already holds this registration number
    pub fn registration_number_taken(&self, number: &str, exclude: Option<BrandId>) -> bool {
        self.table
            .registration_number_owner(number)
            .is_some_and(|owner| Some(owner) != exclude)
    }

    /// Assign an id to a new brand and stage it
    pub fn insert_brand(&mut self, new: NewBrand) -> Result<Brand, RegistryError> {
        let id = self.table.next_id;
        self.table.next_id = id.next().ok_or_else(|| ids_exhausted(id))?;

        let brand = Brand::from_new(id, new);
        self.table.brands.insert(id, brand.clone());
        debug!(brand_id = %id, "staged brand insert");
        Ok(brand)
    }

    /// Stage a replacement of an existing brand
    pub fn put_brand(&mut self, brand: Brand) -> Result<(), RegistryError> {
        if !self.table.brands.contains_key(&brand.id) {
            return Err(RegistryError::brand_not_found(brand.id.to_string()));
        }
        debug!(brand_id = %brand.id, "staged brand update");
        self.table.brands.insert(brand.id, brand);
        Ok(())
    }

    /// Stage removal of a brand
    pub fn remove_brand(&mut self, id: BrandId) -> Result<Brand, RegistryError> {
        let removed = self
            .table
            .brands
            .remove(&id)
            .ok_or_else(|| RegistryError::brand_not_found(id.to_string()))?;
        debug!(brand_id = %id, "staged brand removal");
        Ok(removed)
    }

    /// Assign id and timestamp to an audit record and stage it
    ///
    /// Timestamps never go backwards relative to the last record.
    pub fn append_audit(&mut self, draft: AuditDraft) -> Result<AuditRecord, RegistryError> {
        let now = Utc::now();
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };

        let following = self
            .next_audit_id
            .next()
            .ok_or_else(|| ids_exhausted(self.next_audit_id))?;
        let record = draft.into_record(self.next_audit_id, timestamp);
        self.next_audit_id = following;
        self.last_timestamp = Some(timestamp);
        self.audit.push(record.clone());
        debug!(audit_id = %record.id, action = %record.action, "staged audit record");
        Ok(record)
    }

    /// Persist all staged changes as one atomic write
    pub fn commit(mut self) -> Result<(), RegistryError> {
        let storage = self.storage;

        let previous_len = if self.audit.is_empty() {
            None
        } else {
            match storage.audit.append(&self.audit) {
                Ok(len) => Some(len),
                Err(e) => {
                    // A partial line may have survived the cut back
                    self.writer.log_dirty = true;
                    return Err(e);
                }
            }
        };

        if let Some(last) = self.audit.last() {
            self.table.committed_audit_id = last.id;
        }

        if let Err(e) = storage.brands.write_table(&self.table) {
            warn!(error = %e, "commit failed, rolling back audit log");
            if let Some(len) = previous_len {
                if let Err(truncate_err) = storage.audit.truncate(len) {
                    self.writer.log_dirty = true;
                    error!(
                        error = %truncate_err,
                        "failed to cut back audit log; writes are blocked until storage is reloaded"
                    );
                }
            }
            return Err(e);
        }

        let watermark = self.table.committed_audit_id;
        let appended = self.audit.len();
        {
            let mut brands = storage.brands.write_lock()?;
            let mut audit = storage.audit.write_lock()?;
            *brands = std::mem::take(&mut self.table);
            audit.records.append(&mut self.audit);
        }

        self.committed = true;
        info!(
            committed_audit_id = %watermark,
            audit_records = appended,
            "unit of work committed"
        );
        Ok(())
    }
}

/// Running out of ids means the stored counters are corrupt
fn ids_exhausted(last: impl fmt::Display) -> RegistryError {
    RegistryError::Persistence(format!("No id available after {}", last))
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if !self.committed && !self.audit.is_empty() {
            warn!(
                staged_records = self.audit.len(),
                "unit of work dropped without commit; discarding staged changes"
            );
        }
    }
}
