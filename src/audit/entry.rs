//! Audit record data structures
//!
//! Defines the action kinds, the persisted record and the draft a mutation
//! hands to the store before an id and timestamp are assigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::diff::{diff, status_change_summary, FieldChange};
use super::snapshot::Snapshot;
use crate::models::{AuditContext, AuditId, Brand, BrandId, BrandStatus, UserId};

/// Kinds of mutation that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Brand was created
    Create,
    /// Brand fields were updated
    Update,
    /// Brand was deleted
    Delete,
    /// Only the status was changed
    StatusChange,
}

impl AuditAction {
    /// Every action kind
    pub const ALL: [AuditAction; 4] = [
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::StatusChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::StatusChange => "STATUS_CHANGE",
        }
    }

    /// Parse an action from string (case-insensitive, `-` or `_`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "CREATE" => Some(Self::Create),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "STATUS_CHANGE" => Some(Self::StatusChange),
            _ => None,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed audit record. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Sequential id assigned by the store
    pub id: AuditId,

    /// Brand the mutation applied to
    pub brand_id: BrandId,

    /// Brand name at the time of the mutation
    pub brand_name: String,

    /// Kind of mutation
    pub action: AuditAction,

    /// Acting user
    pub user_id: UserId,

    /// Acting user's email at the time of the mutation
    pub user_email: String,

    /// Snapshot before the mutation (absent for CREATE)
    pub old_values: Option<Snapshot>,

    /// Snapshot after the mutation (absent for DELETE)
    pub new_values: Option<Snapshot>,

    /// Human-readable change summary
    pub summary: Option<String>,

    /// Client address
    pub client_ip: Option<String>,

    /// Client user agent
    pub user_agent: Option<String>,

    /// Assigned by the store at append time (UTC)
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    /// Structured field changes recomputed from the stored snapshots
    pub fn changes(&self) -> Vec<FieldChange> {
        diff(self.old_values.as_ref(), self.new_values.as_ref()).changes
    }

    /// Format the record for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {} ({}) by {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.id,
            self.action,
            self.brand_id,
            self.brand_name,
            self.user_email
        );

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  Changes: {}", summary));
        }

        output
    }
}

/// An audit record that has not been appended yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDraft {
    pub brand_id: BrandId,
    pub brand_name: String,
    pub action: AuditAction,
    pub user_id: UserId,
    pub user_email: String,
    pub old_values: Option<Snapshot>,
    pub new_values: Option<Snapshot>,
    pub summary: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditDraft {
    fn base(
        brand: &Brand,
        action: AuditAction,
        ctx: &AuditContext,
        old_values: Option<Snapshot>,
        new_values: Option<Snapshot>,
        summary: String,
    ) -> Self {
        Self {
            brand_id: brand.id,
            brand_name: brand.name.clone(),
            action,
            user_id: ctx.actor.user_id,
            user_email: ctx.actor.email.clone(),
            old_values,
            new_values,
            summary,
            client_ip: ctx.client.ip.clone(),
            user_agent: ctx.client.user_agent.clone(),
        }
    }

    /// Draft for a newly created brand
    pub fn created(brand: &Brand, ctx: &AuditContext) -> Self {
        let new_values = Snapshot::of(brand);
        let summary = diff(None, Some(&new_values)).summary();
        Self::base(brand, AuditAction::Create, ctx, None, Some(new_values), summary)
    }

    /// Draft for an update, with full before and after snapshots
    pub fn updated(before: &Brand, after: &Brand, ctx: &AuditContext) -> Self {
        let old_values = Snapshot::of(before);
        let new_values = Snapshot::of(after);
        let summary = diff(Some(&old_values), Some(&new_values)).summary();
        Self::base(
            after,
            AuditAction::Update,
            ctx,
            Some(old_values),
            Some(new_values),
            summary,
        )
    }

    /// Draft for a status transition, with status-only snapshots
    pub fn status_changed(
        brand: &Brand,
        from: BrandStatus,
        to: BrandStatus,
        ctx: &AuditContext,
    ) -> Self {
        Self::base(
            brand,
            AuditAction::StatusChange,
            ctx,
            Some(Snapshot::status(from)),
            Some(Snapshot::status(to)),
            status_change_summary(from.as_str(), to.as_str()),
        )
    }

    /// Draft for a deletion, keeping the last full snapshot
    pub fn deleted(brand: &Brand, ctx: &AuditContext) -> Self {
        let old_values = Snapshot::of(brand);
        let summary = diff(Some(&old_values), None).summary();
        Self::base(brand, AuditAction::Delete, ctx, Some(old_values), None, summary)
    }

    /// Turn the draft into a record once the store has assigned identity
    pub fn into_record(self, id: AuditId, timestamp: DateTime<Utc>) -> AuditRecord {
        AuditRecord {
            id,
            brand_id: self.brand_id,
            brand_name: self.brand_name,
            action: self.action,
            user_id: self.user_id,
            user_email: self.user_email,
            old_values: self.old_values,
            new_values: self.new_values,
            summary: Some(self.summary),
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            timestamp,
        }
    }
}
