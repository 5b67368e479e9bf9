//! YAML export functionality
//!
//! Exports the audit history to YAML for human review.

use std::io::Write;

use crate::error::{RegistryError, RegistryResult};
use crate::export::json::AuditExport;
use crate::storage::Storage;

/// Export the audit history to YAML format
pub fn export_audit_yaml<W: Write>(storage: &Storage, mut writer: W) -> RegistryResult<()> {
    let export = AuditExport::from_storage(storage)?;

    writeln!(writer, "# Brand Registry Audit Export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| RegistryError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| RegistryError::Export(e.to_string()))?;

    Ok(())
}

/// Parse a YAML export back into its structure
pub fn parse_audit_yaml(yaml_str: &str) -> RegistryResult<AuditExport> {
    let export: AuditExport =
        serde_yaml::from_str(yaml_str).map_err(|e| RegistryError::Export(e.to_string()))?;

    export.validate().map_err(RegistryError::Export)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::RegistryPaths;
    use crate::models::{Actor, AuditContext, NewBrand, UserId};
    use crate::services::BrandService;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::new(Actor::new(UserId::new(1), "u1@example.com"));
        let brand = BrandService::new(&storage)
            .create(NewBrand::new("Acme", "Jane", UserId::new(1)), &ctx)
            .unwrap();
        BrandService::new(&storage).delete(brand.id, &ctx).unwrap();

        let mut yaml_output = Vec::new();
        export_audit_yaml(&storage, &mut yaml_output).unwrap();
        let yaml_string = String::from_utf8(yaml_output).unwrap();

        assert!(yaml_string.starts_with("# Brand Registry Audit Export"));
        assert!(yaml_string.contains("Acme"));
        assert!(yaml_string.contains("DELETE"));

        let parsed = parse_audit_yaml(&yaml_string).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.brands.is_empty());
    }
}
