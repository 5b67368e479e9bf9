//! Audit engine for the brand registry
//!
//! Every mutation of a brand produces exactly one immutable audit record
//! carrying before/after snapshots and a human-readable change summary.
//!
//! # Architecture
//!
//! - `Snapshot`: field map of a brand at one point in time, keyed by the
//!   compile-time `BrandField` list.
//! - `diff`: computes the field-level `ChangeSet` between two snapshots.
//! - `AuditDraft` / `AuditRecord`: a record before and after the store has
//!   assigned its id and timestamp.
//! - `AuditFilter` / `AuditStatistics`: query facets and aggregates used by
//!   the read side.
//!
//! Persistence lives in `storage::audit_log`; records are only ever appended
//! through a `storage::UnitOfWork`.
//!
//! # Example
//!
//! ```rust,ignore
//! use brand_registry::audit::{diff, AuditDraft, Snapshot};
//!
//! let draft = AuditDraft::updated(&before, &after, &ctx);
//! let mut uow = storage.begin()?;
//! uow.put_brand(after)?;
//! let record = uow.append_audit(draft)?;
//! uow.commit()?;
//!
//! let changes = diff(Some(&Snapshot::of(&before)), Some(&Snapshot::of(&after)));
//! println!("{}", changes.summary());
//! ```

pub mod diff;
pub mod entry;
pub mod query;
pub mod snapshot;

pub use diff::{diff, status_change_summary, ChangeKind, ChangeSet, FieldChange};
pub use entry::{AuditAction, AuditDraft, AuditRecord};
pub use query::{AuditFilter, AuditStatistics};
pub use snapshot::{BrandField, Snapshot};
