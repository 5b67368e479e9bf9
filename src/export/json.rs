//! JSON export functionality
//!
//! Exports the audit history to a versioned JSON document.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditRecord, AuditStatistics};
use crate::error::{RegistryError, RegistryResult};
use crate::models::Brand;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full audit export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Totals per action kind
    pub statistics: AuditStatistics,

    /// Brands that currently exist
    pub brands: Vec<Brand>,

    /// Every audit record, oldest first
    pub records: Vec<AuditRecord>,
}

impl AuditExport {
    /// Create a new export from storage
    pub fn from_storage(storage: &Storage) -> RegistryResult<Self> {
        let records = storage.audit.get_all()?;
        let statistics = records.iter().collect();

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            statistics,
            brands: storage.brands.get_all()?,
            records,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let recomputed: AuditStatistics = self.records.iter().collect();
        if recomputed != self.statistics {
            return Err("Statistics do not match the exported records".into());
        }

        if self.records.windows(2).any(|pair| pair[0].id >= pair[1].id) {
            return Err("Audit records are not in id order".into());
        }

        Ok(())
    }
}

/// Export the audit history to pretty-printed JSON
pub fn export_audit_json<W: Write>(storage: &Storage, writer: W) -> RegistryResult<()> {
    let export = AuditExport::from_storage(storage)?;

    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| RegistryError::Export(e.to_string()))?;

    Ok(())
}
