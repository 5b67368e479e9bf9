//! Core data models for the brand registry
//!
//! The tracked `Brand` record, its status lifecycle, typed ids and the
//! caller context attached to every audited mutation.

pub mod actor;
pub mod brand;
pub mod ids;
pub mod status;

pub use actor::{Actor, AuditContext, ClientInfo};
pub use brand::{Brand, BrandPatch, BrandValidationError, NewBrand};
pub use ids::{AuditId, BrandId, UserId};
pub use status::{AllowAllTransitions, BrandStatus, TransitionPolicy};
