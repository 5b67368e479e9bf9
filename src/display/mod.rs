//! Display formatting for terminal output
//!
//! Formats brands and audit records as plain-text tables and detail views.

pub mod audit;
pub mod brand;

pub use audit::{format_audit_details, format_audit_list, format_audit_statistics};
pub use brand::{format_brand_details, format_brand_list};
