//! Export module for the brand registry
//!
//! Dumps the audit history in multiple formats:
//! - CSV: one row per audit record (spreadsheet-compatible)
//! - JSON: versioned machine-readable document with brands and statistics
//! - YAML: the same document in human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_audit_csv;
pub use self::json::{export_audit_json, AuditExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::{export_audit_yaml, parse_audit_yaml};
