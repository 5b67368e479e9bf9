//! Service layer for the brand registry
//!
//! The service layer provides business logic on top of the storage layer:
//! validation and uniqueness on the write side, filtered and paginated
//! history on the read side.

pub mod audit;
pub mod brand;

pub use audit::AuditService;
pub use brand::BrandService;
