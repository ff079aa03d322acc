//! JSON-file storage backend.

use crate::{Storage, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Storage backed by a single JSON object file.
///
/// Every access re-reads the file, so mutations made by another
/// process using the same path are visible on the next call. Writes
/// go through a temp file plus rename so a crashed write leaves the
/// previous state intact rather than a half-written file.
///
/// An unreadable or malformed file is treated as an empty store on
/// read; the next write replaces it.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Open storage at `path`, creating parent directories as needed.
    /// The file itself is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Open(e.to_string()))?;
        }
        Ok(Self { path })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_cells(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Read(e.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(cells) => Ok(cells),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed storage file, treating as empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_cells(&self, cells: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(cells)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Write(e.to_string()))?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_cells()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cells = self.read_cells()?;
        cells.insert(key.to_string(), value.to_string());
        self.write_cells(&cells)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut cells = self.read_cells()?;
        if cells.remove(key).is_some() {
            self.write_cells(&cells)?;
        }
        Ok(())
    }
}
