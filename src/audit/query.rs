//! Audit query filters and aggregates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{AuditAction, AuditRecord};
use crate::error::{RegistryError, RegistryResult};
use crate::models::{BrandId, UserId};

/// Conjunction of optional facets over the audit log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFilter {
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub action: Option<AuditAction>,
    /// Inclusive lower bound
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the recorded brand name
    #[serde(default)]
    pub brand_name: Option<String>,
}

impl AuditFilter {
    pub fn brand(brand_id: BrandId) -> Self {
        Self {
            brand_id: Some(brand_id),
            ..Self::default()
        }
    }

    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn action(action: AuditAction) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn brand_name(query: impl Into<String>) -> Self {
        Self {
            brand_name: Some(query.into()),
            ..Self::default()
        }
    }

    /// Reject filters that can never be satisfied or are malformed
    pub fn validate(&self) -> RegistryResult<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(RegistryError::Validation(format!(
                    "Start date {} is after end date {}",
                    start.to_rfc3339(),
                    end.to_rfc3339()
                )));
            }
        }

        if let Some(name) = &self.brand_name {
            if name.trim().is_empty() {
                return Err(RegistryError::Validation(
                    "Brand name search text cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// True if the record satisfies every supplied facet
    pub fn matches(&self, record: &AuditRecord) -> bool {
        if self.brand_id.is_some_and(|id| record.brand_id != id) {
            return false;
        }
        if self.user_id.is_some_and(|id| record.user_id != id) {
            return false;
        }
        if self.action.is_some_and(|action| record.action != action) {
            return false;
        }
        if self.start.is_some_and(|start| record.timestamp < start) {
            return false;
        }
        if self.end.is_some_and(|end| record.timestamp > end) {
            return false;
        }
        if let Some(name) = &self.brand_name {
            let needle = name.to_lowercase();
            if !record.brand_name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Totals over the whole audit log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStatistics {
    pub total: usize,
    pub creations: usize,
    pub updates: usize,
    pub deletions: usize,
    pub status_changes: usize,
}

impl AuditStatistics {
    /// Count one record
    pub fn record(&mut self, action: AuditAction) {
        self.total += 1;
        match action {
            AuditAction::Create => self.creations += 1,
            AuditAction::Update => self.updates += 1,
            AuditAction::Delete => self.deletions += 1,
            AuditAction::StatusChange => self.status_changes += 1,
        }
    }

    /// Count for one action kind
    pub fn count(&self, action: AuditAction) -> usize {
        match action {
            AuditAction::Create => self.creations,
            AuditAction::Update => self.updates,
            AuditAction::Delete => self.deletions,
            AuditAction::StatusChange => self.status_changes,
        }
    }

    /// Per-action counts sum to the total
    pub fn is_consistent(&self) -> bool {
        self.creations + self.updates + self.deletions + self.status_changes == self.total
    }
}

impl<'a> FromIterator<&'a AuditRecord> for AuditStatistics {
    fn from_iter<I: IntoIterator<Item = &'a AuditRecord>>(iter: I) -> Self {
        let mut stats = Self::default();
        for record in iter {
            stats.record(record.action);
        }
        stats
    }
}
