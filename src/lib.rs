//! Brand Registry - brand registration records with a change audit trail
//!
//! This library tracks brand registration records and captures every
//! mutation (create, update, delete, status transition) as an immutable,
//! diffable audit record, then serves filtered and paginated history over
//! those records.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (brands, status lifecycle, ids, actors)
//! - `audit`: Snapshots, diffing and audit record types
//! - `storage`: JSON file storage with a unit of work over brands and audit log
//! - `services`: Business logic layer
//! - `export`: CSV, JSON and YAML export of the audit history
//! - `cli` / `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use brand_registry::config::paths::RegistryPaths;
//! use brand_registry::models::{Actor, AuditContext, BrandStatus, NewBrand, UserId};
//! use brand_registry::services::{AuditService, BrandService};
//! use brand_registry::storage::Storage;
//!
//! let storage = Storage::new(RegistryPaths::new()?)?;
//! storage.load_all()?;
//!
//! let ctx = AuditContext::new(Actor::new(UserId::new(1), "jane@example.com"));
//! let brands = BrandService::new(&storage);
//! let acme = brands.create(NewBrand::new("Acme", "Jane", UserId::new(1)), &ctx)?;
//! brands.set_status(acme.id, BrandStatus::Registered, &ctx)?;
//!
//! let history = AuditService::new(&storage).by_brand(acme.id, 0, None)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{RegistryError, RegistryResult};
