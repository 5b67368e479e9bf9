//! Storage initialization
//!
//! Handles first-run setup: directories, a settings file and an empty
//! commit record.

use tracing::info;

use crate::config::paths::RegistryPaths;
use crate::config::settings::Settings;
use crate::error::RegistryError;

use super::brands::{BrandData, BrandTable};
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched.
pub fn initialize_storage(paths: &RegistryPaths) -> Result<(), RegistryError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.brands_file().exists() {
        if paths.audit_log().exists() {
            // Loading reports this; writing an empty commit record here
            // would silently discard the log
            return Ok(());
        }
        write_json_atomic(paths.brands_file(), &BrandData::from(&BrandTable::default()))?;
        info!(path = %paths.brands_file().display(), "created empty commit record");
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &RegistryPaths) -> bool {
    !paths.brands_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BrandRepository;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.brands_file().exists());
        assert!(paths.settings_file().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.audit_log().exists());
    }

    #[test]
    fn test_empty_commit_record() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.brands_file()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["next_id"], 1);
        assert_eq!(value["committed_audit_id"], 0);
        assert_eq!(value["brands"], serde_json::json!([]));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let mut settings = Settings::default();
        settings.query.default_limit = 10;
        settings.save(&paths).unwrap();

        initialize_storage(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.query.default_limit, 10);

        let repo = BrandRepository::new(paths.brands_file());
        assert!(repo.load().unwrap());
    }
}
