//! Diff generation for audit logging
//!
//! Computes a field-level change set between two brand snapshots and renders
//! it as a one-line, human-readable summary. The structured list is what the
//! rest of the crate reasons about; the string is only for review.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::snapshot::{BrandField, Snapshot};

/// Summary of a snapshot appearing out of nothing
pub const CREATED_SUMMARY: &str = "Record created";
/// Summary of a snapshot disappearing
pub const DELETED_SUMMARY: &str = "Record deleted";
/// Summary when no reportable field differs
pub const UNCHANGED_SUMMARY: &str = "No changes detected";

/// Longest summary kept on a record
pub const MAX_SUMMARY_LEN: usize = 500;

/// What happened between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Deleted,
    Modified,
    Unchanged,
}

/// One field whose value differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: BrandField,
    pub old_value: Value,
    pub new_value: Value,
}

impl FieldChange {
    /// `"<field>: <old> → <new>"`
    pub fn fragment(&self) -> String {
        format!(
            "{}: {} → {}",
            self.field,
            format_value(&self.old_value),
            format_value(&self.new_value)
        )
    }
}

/// Result of diffing two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    pub kind: ChangeKind,
    pub changes: Vec<FieldChange>,
}

impl ChangeSet {
    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        match self.kind {
            ChangeKind::Created => CREATED_SUMMARY.to_string(),
            ChangeKind::Deleted => DELETED_SUMMARY.to_string(),
            ChangeKind::Unchanged => UNCHANGED_SUMMARY.to_string(),
            ChangeKind::Modified => {
                let fragments: Vec<String> =
                    self.changes.iter().map(FieldChange::fragment).collect();
                truncate_summary(fragments.join("; "))
            }
        }
    }

    /// True if at least one field differs
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Compute the change set between two optional snapshots
///
/// Only keys present in `new` are considered; a key missing from `old` or
/// holding an equal value is skipped. Fragments follow the order of `new`.
pub fn diff(old: Option<&Snapshot>, new: Option<&Snapshot>) -> ChangeSet {
    match (old, new) {
        (None, None) => ChangeSet {
            kind: ChangeKind::Unchanged,
            changes: Vec::new(),
        },
        (None, Some(_)) => ChangeSet {
            kind: ChangeKind::Created,
            changes: Vec::new(),
        },
        (Some(_), None) => ChangeSet {
            kind: ChangeKind::Deleted,
            changes: Vec::new(),
        },
        (Some(old), Some(new)) => {
            let changes: Vec<FieldChange> = new
                .iter()
                .filter_map(|(field, new_value)| {
                    let old_value = old.get(field)?;
                    (old_value != new_value).then(|| FieldChange {
                        field,
                        old_value: old_value.clone(),
                        new_value: new_value.clone(),
                    })
                })
                .collect();

            let kind = if changes.is_empty() {
                ChangeKind::Unchanged
            } else {
                ChangeKind::Modified
            };

            ChangeSet { kind, changes }
        }
    }
}

/// Summary recorded for a status transition
pub fn status_change_summary(from: &str, to: &str) -> String {
    format!("Status changed: {} → {}", from, to)
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

fn truncate_summary(summary: String) -> String {
    if summary.chars().count() <= MAX_SUMMARY_LEN {
        return summary;
    }
    let mut head: String = summary.chars().take(MAX_SUMMARY_LEN - 3).collect();
    head.push_str("...");
    head
}
