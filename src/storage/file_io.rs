//! JSON file reads and crash-safe writes for the entity files

use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TravelError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> TravelError {
    TravelError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON file; a missing file reads as `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, TravelError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path, e)),
    };

    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Sibling temp file the data is staged in before the rename
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write pretty JSON so the file holds either the old or the new contents
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TravelError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let staging = staging_path(path);
    let staged = File::create(&staging).and_then(|file| {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data).map_err(io::Error::from)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    });

    if let Err(e) = staged.and_then(|_| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(storage_error("write", path, e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Row {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let rows: Vec<Row> = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.json");
        let rows = vec![Row {
            name: "tagine".to_string(),
            value: 42,
        }];

        write_json_atomic(&path, &rows).unwrap();
        let loaded: Vec<Row> = read_json(&path).unwrap();
        assert_eq!(rows, loaded);
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("rows.json");
        write_json_atomic(&path, &Vec::<Row>::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_staging_path_is_a_sibling() {
        let path = Path::new("/data/travels.json");
        assert_eq!(staging_path(path), Path::new("/data/travels.json.tmp"));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Vec<Row>, _>(&path).unwrap_err();
        assert!(matches!(err, TravelError::Storage(_)));
    }
}
