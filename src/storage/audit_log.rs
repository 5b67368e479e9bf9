//! Append-only audit log
//!
//! Each audit record is one JSON line in `audit.log`. Records are only added
//! through a unit of work; there is no update or delete API.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::{RwLock, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::audit::{AuditFilter, AuditRecord, AuditStatistics};
use crate::error::RegistryError;
use crate::models::AuditId;

use super::file_io::{append_lines, truncate_file};

/// Loaded audit log
#[derive(Debug, Default)]
pub(crate) struct AuditLogState {
    /// Records in id order
    pub(crate) records: Vec<AuditRecord>,
}

impl AuditLogState {
    pub(crate) fn last_id(&self) -> AuditId {
        self.records.last().map(|r| r.id).unwrap_or_default()
    }

    pub(crate) fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.records.iter().map(|r| r.timestamp).max()
    }
}

/// Repository for the audit log
pub struct AuditRepository {
    path: PathBuf,
    state: RwLock<AuditLogState>,
}

impl AuditRepository {
    /// Create a new audit repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(AuditLogState::default()),
        }
    }

    /// Check if the audit log file exists and holds anything
    pub fn has_entries_on_disk(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.len() > 0)
            .unwrap_or(false)
    }

    /// Load the log, discarding anything past the committed watermark
    ///
    /// Lines past `committed` are leftovers of a unit of work whose commit
    /// record was never written. They are cut from the file. Missing
    /// committed records, ids that do not strictly increase, or an
    /// unreadable committed line are errors.
    pub fn load(&self, committed: AuditId) -> Result<(), RegistryError> {
        let mut records = Vec::new();
        let mut offset: u64 = 0;
        let mut truncate_at = None;

        if self.path.exists() {
            let file = File::open(&self.path).map_err(|e| {
                RegistryError::Persistence(format!("Failed to open audit log: {}", e))
            })?;
            let mut reader = BufReader::new(file);
            let mut line = String::new();
            let mut line_num = 0;

            loop {
                line.clear();
                let read = reader.read_line(&mut line).map_err(|e| {
                    RegistryError::Persistence(format!(
                        "Failed to read audit log line {}: {}",
                        line_num + 1,
                        e
                    ))
                })?;
                if read == 0 {
                    break;
                }
                line_num += 1;

                if line.trim().is_empty() {
                    offset += read as u64;
                    continue;
                }

                let committed_so_far = records
                    .last()
                    .map(|r: &AuditRecord| r.id)
                    .unwrap_or_default();

                match serde_json::from_str::<AuditRecord>(line.trim_end()) {
                    Ok(record) if record.id <= committed && record.id <= committed_so_far => {
                        return Err(RegistryError::Persistence(format!(
                            "Audit record {} at line {} does not follow {}",
                            record.id, line_num, committed_so_far
                        )));
                    }
                    Ok(record) if record.id <= committed => {
                        records.push(record);
                        offset += read as u64;
                    }
                    // Past the watermark, or a torn line after the last
                    // committed record
                    Ok(_) => {
                        truncate_at = Some(offset);
                        break;
                    }
                    Err(_) if committed_so_far == committed => {
                        truncate_at = Some(offset);
                        break;
                    }
                    Err(e) => {
                        return Err(RegistryError::Persistence(format!(
                            "Failed to parse audit record at line {}: {}",
                            line_num, e
                        )));
                    }
                }
            }
        }

        let last_id = records.last().map(|r| r.id).unwrap_or_default();
        if last_id != committed {
            return Err(RegistryError::Persistence(format!(
                "Audit log ends at {} but the commit record expects {}",
                last_id, committed
            )));
        }

        if let Some(len) = truncate_at {
            warn!(
                path = %self.path.display(),
                committed = %committed,
                kept_bytes = len,
                "discarding uncommitted audit records"
            );
            truncate_file(&self.path, len)?;
        }

        let mut state = self.write_lock()?;
        *state = AuditLogState { records };

        Ok(())
    }

    /// Append encoded records to the file; returns the previous file length
    pub(crate) fn append(&self, records: &[AuditRecord]) -> Result<u64, RegistryError> {
        let lines = records
            .iter()
            .map(|r| {
                serde_json::to_string(r).map_err(|e| {
                    RegistryError::Persistence(format!("Failed to serialize audit record: {}", e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        append_lines(&self.path, &lines)
    }

    /// Cut the file back after a failed commit
    pub(crate) fn truncate(&self, len: u64) -> Result<(), RegistryError> {
        truncate_file(&self.path, len)
    }

    pub(crate) fn write_lock(&self) -> Result<RwLockWriteGuard<'_, AuditLogState>, RegistryError> {
        self.state.write().map_err(|e| {
            RegistryError::Persistence(format!("Failed to acquire write lock: {}", e))
        })
    }

    fn read<T>(&self, f: impl FnOnce(&AuditLogState) -> T) -> Result<T, RegistryError> {
        let state = self.state.read().map_err(|e| {
            RegistryError::Persistence(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(f(&state))
    }

    /// Get an audit record by ID
    pub fn get(&self, id: AuditId) -> Result<Option<AuditRecord>, RegistryError> {
        self.read(|s| {
            s.records
                .binary_search_by_key(&id, |r| r.id)
                .ok()
                .map(|i| s.records[i].clone())
        })
    }

    /// Records matching a filter, newest first (timestamp, then id)
    pub fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditRecord>, RegistryError> {
        self.read(|s| {
            let mut matched: Vec<AuditRecord> = s
                .records
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect();
            matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            matched
        })
    }

    /// All records in append order
    pub fn get_all(&self) -> Result<Vec<AuditRecord>, RegistryError> {
        self.read(|s| s.records.clone())
    }

    /// Totals over every record
    pub fn statistics(&self) -> Result<AuditStatistics, RegistryError> {
        self.read(|s| s.records.iter().collect())
    }

    /// Count records
    pub fn count(&self) -> Result<usize, RegistryError> {
        self.read(|s| s.records.len())
    }

    /// Id of the newest committed record (zero when empty)
    pub fn last_id(&self) -> Result<AuditId, RegistryError> {
        self.read(AuditLogState::last_id)
    }

    /// Timestamp of the newest committed record
    pub fn last_timestamp(&self) -> Result<Option<DateTime<Utc>>, RegistryError> {
        self.read(AuditLogState::last_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, AuditDraft};
    use crate::models::{Actor, AuditContext, Brand, BrandId, NewBrand, UserId};
    use chrono::Duration;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, AuditRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = AuditRepository::new(temp_dir.path().join("audit.log"));
        (temp_dir, repo)
    }

    fn record(id: u64, brand_id: u64, ts: DateTime<Utc>) -> AuditRecord {
        let brand = Brand::from_new(
            BrandId::new(brand_id),
            NewBrand::new(format!("Brand {}", brand_id), "Jane", UserId::new(1)),
        );
        let ctx = AuditContext::new(Actor::new(UserId::new(1), "u1@example.com"));
        AuditDraft::created(&brand, &ctx).into_record(AuditId::new(id), ts)
    }

    #[test]
    fn test_empty_log() {
        let (_temp, repo) = create_test_repo();
        repo.load(AuditId::default()).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.last_id().unwrap(), AuditId::default());
        assert!(repo.last_timestamp().unwrap().is_none());
        assert!(!repo.has_entries_on_disk());
    }

    #[test]
    fn test_append_and_reload() {
        let (temp, repo) = create_test_repo();
        let now = Utc::now();
        repo.append(&[record(1, 1, now), record(2, 2, now)]).unwrap();

        // A new repository on the same file (simulating restart)
        let reopened = AuditRepository::new(temp.path().join("audit.log"));
        reopened.load(AuditId::new(2)).unwrap();
        assert_eq!(reopened.count().unwrap(), 2);
        assert_eq!(reopened.get(AuditId::new(2)).unwrap().unwrap().brand_id, BrandId::new(2));
        assert!(reopened.get(AuditId::new(3)).unwrap().is_none());
    }

    #[test]
    fn test_load_discards_records_past_watermark() {
        let (temp, repo) = create_test_repo();
        let now = Utc::now();
        repo.append(&[record(1, 1, now)]).unwrap();
        let committed_len = fs::metadata(temp.path().join("audit.log")).unwrap().len();
        repo.append(&[record(2, 1, now)]).unwrap();

        repo.load(AuditId::new(1)).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(
            fs::metadata(temp.path().join("audit.log")).unwrap().len(),
            committed_len
        );
    }

    #[test]
    fn test_load_discards_torn_line() {
        let (temp, repo) = create_test_repo();
        let path = temp.path().join("audit.log");
        repo.append(&[record(1, 1, Utc::now())]).unwrap();
        let committed_len = fs::metadata(&path).unwrap().len();

        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("{\"id\":2,\"brand_");
        fs::write(&path, contents).unwrap();

        repo.load(AuditId::new(1)).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(fs::metadata(&path).unwrap().len(), committed_len);
    }

    #[test]
    fn test_load_fails_when_committed_records_missing() {
        let (_temp, repo) = create_test_repo();
        repo.append(&[record(1, 1, Utc::now())]).unwrap();

        let err = repo.load(AuditId::new(3)).unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_load_fails_on_repeated_id() {
        let (_temp, repo) = create_test_repo();
        let now = Utc::now();
        repo.append(&[record(1, 1, now), record(2, 2, now), record(2, 3, now)])
            .unwrap();

        let err = repo.load(AuditId::new(2)).unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_query_orders_newest_first() {
        let (_temp, repo) = create_test_repo();
        let now = Utc::now();
        repo.append(&[
            record(1, 1, now),
            record(2, 2, now + Duration::seconds(5)),
            record(3, 1, now + Duration::seconds(5)),
        ])
        .unwrap();
        repo.load(AuditId::new(3)).unwrap();

        let ids: Vec<_> = repo
            .query(&AuditFilter::default())
            .unwrap()
            .iter()
            .map(|r| r.id.value())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let for_brand = repo.query(&AuditFilter::brand(BrandId::new(1))).unwrap();
        assert_eq!(for_brand.len(), 2);

        let stats = repo.statistics().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.count(AuditAction::Create), 3);
    }

    #[test]
    fn test_truncate_after_failed_commit() {
        let (temp, repo) = create_test_repo();
        let path = temp.path().join("audit.log");
        repo.append(&[record(1, 1, Utc::now())]).unwrap();
        let previous = repo.append(&[record(2, 1, Utc::now())]).unwrap();

        repo.truncate(previous).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), previous);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }
}
