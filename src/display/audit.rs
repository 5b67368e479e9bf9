//! Audit display formatting

use crate::audit::{AuditAction, AuditRecord, AuditStatistics};

use super::brand::column_width;

const SUMMARY_WIDTH: usize = 60;

/// Format audit records as a table, in the order given
pub fn format_audit_list(records: &[AuditRecord]) -> String {
    if records.is_empty() {
        return "No audit records found.".to_string();
    }

    let id_width = column_width(records.iter().map(|r| r.id.to_string().len()), 2);
    let brand_width = column_width(records.iter().map(|r| r.brand_name.chars().count()), 5);
    let user_width = column_width(records.iter().map(|r| r.user_email.chars().count()), 4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<20}  {:<13}  {:<brand_width$}  {:<user_width$}  {}\n",
        "ID", "Timestamp", "Action", "Brand", "User", "Summary",
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<20}  {:-<13}  {:-<brand_width$}  {:-<user_width$}  {:-<20}\n",
        "", "", "", "", "", "",
    ));

    for record in records {
        output.push_str(&format!(
            "{:<id_width$}  {:<20}  {:<13}  {:<brand_width$}  {:<user_width$}  {}\n",
            record.id.to_string(),
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.action.as_str(),
            record.brand_name,
            record.user_email,
            shorten(record.summary.as_deref().unwrap_or(""), SUMMARY_WIDTH),
        ));
    }

    output
}

/// Format a single record with its field-level changes
pub fn format_audit_details(record: &AuditRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Audit Record: {}\n", record.id));
    output.push_str(&format!(
        "  Timestamp:  {}\n",
        record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f UTC")
    ));
    output.push_str(&format!("  Action:     {}\n", record.action));
    output.push_str(&format!(
        "  Brand:      {} ({})\n",
        record.brand_name, record.brand_id
    ));
    output.push_str(&format!(
        "  User:       {} ({})\n",
        record.user_email, record.user_id
    ));
    if let Some(ip) = &record.client_ip {
        output.push_str(&format!("  Client IP:  {}\n", ip));
    }
    if let Some(agent) = &record.user_agent {
        output.push_str(&format!("  User Agent: {}\n", agent));
    }
    if let Some(summary) = &record.summary {
        output.push_str(&format!("  Summary:    {}\n", summary));
    }

    let changes = record.changes();
    if !changes.is_empty() {
        output.push_str("\n  Changes:\n");
        for change in &changes {
            output.push_str(&format!("    {}\n", change.fragment()));
        }
    }

    for (label, snapshot) in [("Before", &record.old_values), ("After", &record.new_values)] {
        if let Some(snapshot) = snapshot {
            output.push_str(&format!("\n  {}:\n", label));
            for (field, value) in snapshot.iter() {
                output.push_str(&format!("    {:<20} {}\n", field.as_str(), value));
            }
        }
    }

    output
}

/// Format the per-action totals
pub fn format_audit_statistics(stats: &AuditStatistics) -> String {
    let mut output = String::new();
    output.push_str("Audit Statistics\n");
    output.push_str(&format!("  {:<15} {:>8}\n", "Total", stats.total));
    for action in AuditAction::ALL {
        output.push_str(&format!(
            "  {:<15} {:>8}\n",
            action.as_str(),
            stats.count(action)
        ));
    }
    output
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}
