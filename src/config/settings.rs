//! User settings for the brand registry
//!
//! Holds the audit query page limits and the default log level.

use serde::{Deserialize, Serialize};

use super::paths::RegistryPaths;
use crate::error::RegistryError;

/// Absolute ceiling on any page size, whatever the settings file says
pub const HARD_LIMIT_CAP: usize = 1000;

/// Page size limits for audit queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Page size used when the caller gives none
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest page size a caller may request
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Number of entries returned by `recent` when no count is given
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_limit() -> usize {
    100
}

fn default_max_limit() -> usize {
    HARD_LIMIT_CAP
}

fn default_recent_limit() -> usize {
    50
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl QuerySettings {
    /// Limits with the maximum clamped to the hard cap and the defaults
    /// clamped into `1..=max_limit`
    pub fn effective(&self) -> Self {
        let max_limit = self.max_limit.clamp(1, HARD_LIMIT_CAP);
        Self {
            default_limit: self.default_limit.clamp(1, max_limit),
            max_limit,
            recent_limit: self.recent_limit.clamp(1, max_limit),
        }
    }
}

/// User settings for the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Audit query limits
    #[serde(default)]
    pub query: QuerySettings,

    /// Default tracing filter when no environment override is present
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            query: QuerySettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &RegistryPaths) -> Result<Self, RegistryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RegistryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RegistryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RegistryPaths) -> Result<(), RegistryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RegistryError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            RegistryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
