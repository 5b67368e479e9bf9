//! Path management for the brand registry
//!
//! ## Path Resolution Order
//!
//! 1. `BRAND_REGISTRY_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `brand-registry`
//!    (`~/.config/brand-registry` on Linux, `%APPDATA%` on Windows, ...)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::RegistryError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BRAND_REGISTRY_DATA_DIR";

/// Manages all paths used by the registry
#[derive(Debug, Clone)]
pub struct RegistryPaths {
    /// Base directory for all registry data
    base_dir: PathBuf,
}

impl RegistryPaths {
    /// Create a new RegistryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform configuration directory can be
    /// determined and no override is set.
    pub fn new() -> Result<Self, RegistryError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create RegistryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to brands.json, which doubles as the commit record
    pub fn brands_file(&self) -> PathBuf {
        self.data_dir().join("brands.json")
    }

    /// Get the path to the append-only audit log
    pub fn audit_log(&self) -> PathBuf {
        self.data_dir().join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), RegistryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RegistryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RegistryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the registry has been initialized (commit record exists)
    pub fn is_initialized(&self) -> bool {
        self.brands_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, RegistryError> {
    ProjectDirs::from("", "", "brand-registry")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            RegistryError::Config(format!(
                "Could not determine a configuration directory; set {}",
                DATA_DIR_ENV
            ))
        })
}
