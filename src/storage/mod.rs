//! Storage layer for the brand registry
//!
//! JSON file storage with atomic writes. `brands.json` holds the brand table
//! and is the commit record; `audit.log` holds one JSON line per audit
//! record. All writes go through a [`UnitOfWork`].

pub mod audit_log;
pub mod brands;
pub mod file_io;
pub mod init;
pub mod unit_of_work;

pub use audit_log::AuditRepository;
pub use brands::BrandRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use unit_of_work::UnitOfWork;

use std::sync::Mutex;

use tracing::debug;

use crate::config::paths::RegistryPaths;
use crate::error::RegistryError;

/// State guarded by the writer lock
#[derive(Debug, Default)]
pub(crate) struct WriterState {
    /// The audit log may hold lines of a failed commit that could not be
    /// cut back; writes are refused until the next `load_all`
    pub(crate) log_dirty: bool,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: RegistryPaths,
    pub brands: BrandRepository,
    pub audit: AuditRepository,
    writer: Mutex<WriterState>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: RegistryPaths) -> Result<Self, RegistryError> {
        paths.ensure_directories()?;

        Ok(Self {
            brands: BrandRepository::new(paths.brands_file()),
            audit: AuditRepository::new(paths.audit_log()),
            writer: Mutex::new(WriterState::default()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &RegistryPaths {
        &self.paths
    }

    /// Load all data from disk, dropping audit records of interrupted commits
    pub fn load_all(&self) -> Result<(), RegistryError> {
        let mut writer = self.writer.lock().map_err(|e| {
            RegistryError::Persistence(format!("Failed to acquire writer lock: {}", e))
        })?;

        let has_commit_record = self.brands.load()?;
        if !has_commit_record && self.audit.has_entries_on_disk() {
            return Err(RegistryError::Persistence(format!(
                "Audit log {} exists without a commit record at {}",
                self.paths.audit_log().display(),
                self.paths.brands_file().display()
            )));
        }

        let committed = self.brands.committed_audit_id()?;
        self.audit.load(committed)?;
        writer.log_dirty = false;

        debug!(
            brands = self.brands.count()?,
            audit_records = self.audit.count()?,
            "storage loaded"
        );
        Ok(())
    }

    /// Start a unit of work, blocking until no other writer is active
    ///
    /// Fails while the audit log holds leftovers of a failed commit.
    pub fn begin(&self) -> Result<UnitOfWork<'_>, RegistryError> {
        let writer = self.writer.lock().map_err(|e| {
            RegistryError::Persistence(format!("Failed to acquire writer lock: {}", e))
        })?;

        if writer.log_dirty {
            return Err(RegistryError::Persistence(
                "Audit log holds records of a failed commit; reload storage before writing"
                    .into(),
            ));
        }

        UnitOfWork::new(self, writer)
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
