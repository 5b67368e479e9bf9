//! Audit query service
//!
//! Read-side facade over the audit log: filtered, paginated and aggregated
//! views. Results are ordered newest first (timestamp, then id). Nothing
//! here writes.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::audit::{AuditAction, AuditFilter, AuditRecord, AuditStatistics};
use crate::config::settings::QuerySettings;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{AuditId, BrandId, UserId};
use crate::storage::Storage;

/// Service for querying audit history
pub struct AuditService<'a> {
    storage: &'a Storage,
    limits: QuerySettings,
}

impl<'a> AuditService<'a> {
    /// Create a new audit service with default page limits
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_limits(storage, QuerySettings::default())
    }

    /// Create a new audit service with configured page limits
    pub fn with_limits(storage: &'a Storage, limits: QuerySettings) -> Self {
        Self {
            storage,
            limits: limits.effective(),
        }
    }

    /// Records matching every facet of `filter`
    pub fn search(
        &self,
        filter: &AuditFilter,
        skip: usize,
        limit: Option<usize>,
    ) -> RegistryResult<Vec<AuditRecord>> {
        filter.validate()?;
        let limit = self.page_limit(limit, self.limits.default_limit)?;

        debug!(?filter, skip, limit, "audit search");
        let records = self.storage.audit.query(filter)?;
        Ok(records.into_iter().skip(skip).take(limit).collect())
    }

    /// History of one brand, including after it was deleted
    pub fn by_brand(
        &self,
        brand_id: BrandId,
        skip: usize,
        limit: Option<usize>,
    ) -> RegistryResult<Vec<AuditRecord>> {
        self.search(&AuditFilter::brand(brand_id), skip, limit)
    }

    /// Everything one user did
    pub fn by_user(
        &self,
        user_id: UserId,
        skip: usize,
        limit: Option<usize>,
    ) -> RegistryResult<Vec<AuditRecord>> {
        self.search(&AuditFilter::user(user_id), skip, limit)
    }

    /// Records of one action kind
    pub fn by_action(
        &self,
        action: AuditAction,
        skip: usize,
        limit: Option<usize>,
    ) -> RegistryResult<Vec<AuditRecord>> {
        self.search(&AuditFilter::action(action), skip, limit)
    }

    /// Records with `start <= timestamp <= end`
    pub fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        skip: usize,
        limit: Option<usize>,
    ) -> RegistryResult<Vec<AuditRecord>> {
        self.search(&AuditFilter::date_range(start, end), skip, limit)
    }

    /// Records whose brand name contains `query` (case-insensitive)
    pub fn search_by_brand_name(
        &self,
        query: &str,
        skip: usize,
        limit: Option<usize>,
    ) -> RegistryResult<Vec<AuditRecord>> {
        self.search(&AuditFilter::brand_name(query), skip, limit)
    }

    /// The newest records across all brands
    pub fn recent(&self, limit: Option<usize>) -> RegistryResult<Vec<AuditRecord>> {
        let limit = self.page_limit(limit, self.limits.recent_limit)?;
        let records = self.storage.audit.query(&AuditFilter::default())?;
        Ok(records.into_iter().take(limit).collect())
    }

    /// Totals per action kind
    pub fn statistics(&self) -> RegistryResult<AuditStatistics> {
        self.storage.audit.statistics()
    }

    /// A single record
    pub fn get(&self, id: AuditId) -> RegistryResult<AuditRecord> {
        self.storage
            .audit
            .get(id)?
            .ok_or_else(|| RegistryError::audit_not_found(id.to_string()))
    }

    fn page_limit(&self, requested: Option<usize>, default: usize) -> RegistryResult<usize> {
        let limit = requested.unwrap_or(default);
        if limit == 0 || limit > self.limits.max_limit {
            return Err(RegistryError::Validation(format!(
                "Limit must be between 1 and {}, got {}",
                self.limits.max_limit, limit
            )));
        }
        Ok(limit)
    }
}
