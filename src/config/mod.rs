//! Configuration module for the brand registry
//!
//! - Platform-aware path resolution
//! - User settings persistence (query limits, log level)

pub mod paths;
pub mod settings;

pub use paths::RegistryPaths;
pub use settings::{QuerySettings, Settings};
