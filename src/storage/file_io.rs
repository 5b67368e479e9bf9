//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::RegistryError;

/// Read JSON from a file, returning `None` if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<Option<T>, RegistryError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path).map_err(|e| {
        RegistryError::Persistence(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map(Some).map_err(|e| {
        RegistryError::Persistence(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), RegistryError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RegistryError::Persistence(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| RegistryError::Persistence(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| RegistryError::Persistence(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| RegistryError::Persistence(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| RegistryError::Persistence(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RegistryError::Persistence(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Append pre-encoded lines to a file and sync them to disk
///
/// Returns the file length before the append. On failure the file is cut
/// back to that length so no partial line survives.
pub fn append_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<u64, RegistryError> {
    let path = path.as_ref();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            RegistryError::Persistence(format!("Failed to open {}: {}", path.display(), e))
        })?;

    let previous_len = file
        .metadata()
        .map_err(|e| RegistryError::Persistence(format!("Failed to stat {}: {}", path.display(), e)))?
        .len();

    let result = (|| -> std::io::Result<()> {
        let mut writer = BufWriter::new(&file);
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        file.sync_all()
    })();

    if let Err(e) = result {
        let _ = truncate_file(path, previous_len);
        return Err(RegistryError::Persistence(format!(
            "Failed to append to {}: {}",
            path.display(),
            e
        )));
    }

    Ok(previous_len)
}

/// Cut a file back to `len` bytes and sync
pub fn truncate_file<P: AsRef<Path>>(path: P, len: u64) -> Result<(), RegistryError> {
    let path = path.as_ref();

    let file = OpenOptions::new().write(true).open(path).map_err(|e| {
        RegistryError::Persistence(format!("Failed to open {}: {}", path.display(), e))
    })?;

    file.set_len(len)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            RegistryError::Persistence(format!("Failed to truncate {}: {}", path.display(), e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: Option<TestData> = read_json(&path).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());

        let loaded: Option<TestData> = read_json(&path).unwrap();
        assert_eq!(loaded, Some(data));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let temp_path = temp_dir.path().join("test.json.tmp");

        write_json_atomic(&path, &TestData::default()).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_failed_write_leaves_original_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let original = TestData {
            name: "original".to_string(),
            value: 1,
        };
        write_json_atomic(&path, &original).unwrap();

        // A directory where the temp file should go makes the write fail
        fs::create_dir(temp_dir.path().join("test.json.tmp")).unwrap();

        let err = write_json_atomic(&path, &TestData::default()).unwrap_err();
        assert!(err.is_persistence());

        let loaded: Option<TestData> = read_json(&path).unwrap();
        assert_eq!(loaded, Some(original));
    }

    #[test]
    fn test_unparseable_file_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_append_and_truncate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.jsonl");

        let first = append_lines(&path, &["{\"a\":1}".to_string()]).unwrap();
        assert_eq!(first, 0);

        let second = append_lines(&path, &["{\"a\":2}".to_string(), "{\"a\":3}".to_string()])
            .unwrap();
        assert_eq!(second, 8);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);

        truncate_file(&path, second).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n");
    }
}
