use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::Result;

/// Medium holding the raw serialized records, one value per key.
pub trait StateBackend {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Volatile backend for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map is still a consistent map: every write replaces a whole value
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StateBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.records().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.records().remove(key);
        Ok(())
    }
}

/// Name of the subdirectory holding in-flight writes
pub const STAGING_DIR: &str = ".staging";

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn staging(&self) -> PathBuf {
        self.dir.join(STAGING_DIR)
    }
}

impl StateBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Each write stages into its own uniquely named temp file and renames
    /// it over the record. A failed write leaves the previous value in place,
    /// and overlapping writes resolve to one complete value.
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let staging = self.staging();
        fs::create_dir_all(&staging)?;

        let mut file = tempfile::Builder::new()
            .prefix(&format!("{}.", key))
            .suffix(".tmp")
            .tempfile_in(&staging)?;
        file.write_all(value.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(self.path(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert!(backend.read("k").unwrap().is_none());

        backend.write("k", "v").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("v"));

        backend.remove("k").unwrap();
        assert!(backend.read("k").unwrap().is_none());
    }

    #[test]
    fn test_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("state")).unwrap();

        assert!(backend.read("k").unwrap().is_none());
        backend.write("k", "{\"a\":1}").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("{\"a\":1}"));
        let leftovers = fs::read_dir(backend.dir().join(STAGING_DIR)).unwrap().count();
        assert_eq!(leftovers, 0);

        backend.remove("k").unwrap();
        backend.remove("k").unwrap();
        assert!(backend.read("k").unwrap().is_none());
    }

    #[test]
    fn test_failed_staging_keeps_record() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();
        backend.write("k", "\"first\"").unwrap();

        // a plain file where the staging directory belongs
        let staging = dir.path().join(STAGING_DIR);
        fs::remove_dir_all(&staging).unwrap();
        fs::write(&staging, "").unwrap();

        assert!(backend.write("k", "\"second\"").is_err());
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("\"first\""));

        fs::remove_file(&staging).unwrap();
        backend.write("k", "\"second\"").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("\"second\""));
    }
}
