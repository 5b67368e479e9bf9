//! CSV export functionality
//!
//! Writes one row per audit record. Snapshots are embedded as compact JSON.

use std::io::Write;

use crate::audit::{AuditRecord, Snapshot};
use crate::error::{RegistryError, RegistryResult};

const HEADER: [&str; 12] = [
    "id",
    "timestamp",
    "action",
    "brand_id",
    "brand_name",
    "user_id",
    "user_email",
    "summary",
    "old_values",
    "new_values",
    "client_ip",
    "user_agent",
];

/// Export audit records to CSV, in the order given
pub fn export_audit_csv<W: Write>(records: &[AuditRecord], writer: W) -> RegistryResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(HEADER)
        .map_err(|e| RegistryError::Export(e.to_string()))?;

    for record in records {
        csv_writer
            .write_record([
                record.id.value().to_string(),
                record.timestamp.to_rfc3339(),
                record.action.to_string(),
                record.brand_id.value().to_string(),
                record.brand_name.clone(),
                record.user_id.value().to_string(),
                record.user_email.clone(),
                record.summary.clone().unwrap_or_default(),
                snapshot_cell(record.old_values.as_ref()),
                snapshot_cell(record.new_values.as_ref()),
                record.client_ip.clone().unwrap_or_default(),
                record.user_agent.clone().unwrap_or_default(),
            ])
            .map_err(|e| RegistryError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| RegistryError::Export(e.to_string()))?;

    Ok(())
}

fn snapshot_cell(snapshot: Option<&Snapshot>) -> String {
    snapshot
        .map(|s| s.to_json().to_string())
        .unwrap_or_default()
}
