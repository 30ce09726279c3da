//! Key-value backends the storage adapter writes through.
//!
//! The file backend keeps one JSON document per key, which is the
//! deployment analog of the browser-local storage the data layout was
//! designed for. The in-memory backend backs tests and can simulate a
//! full store through an optional byte quota.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// Throwaway payload written by capacity probes.
const PROBE_PAYLOAD: &str = "probe";

pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
    /// Attempt a small throwaway write so a full or unwritable store is
    /// detected before the real payload goes out.
    fn probe(&self) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        (**self).write(key, payload)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn probe(&self) -> Result<(), StorageError> {
        (**self).probe()
    }
}

fn classify_io(err: io::Error) -> StorageError {
    match err.kind() {
        io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => StorageError::QuotaExceeded,
        _ => StorageError::Unavailable(err.to_string()),
    }
}

/// One file per key inside a dedicated directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(classify_io)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(classify_io(err)),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        fs::write(self.entry_path(key), payload).map_err(classify_io)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(classify_io(err)),
        }
    }

    fn probe(&self) -> Result<(), StorageError> {
        let path = self.dir.join(".probe");
        fs::write(&path, PROBE_PAYLOAD).map_err(classify_io)?;
        if let Err(err) = fs::remove_file(&path) {
            log::warn!("failed to remove probe file {}: {err}", path.display());
        }
        Ok(())
    }
}

/// HashMap-backed store. With a quota set, writes that would push the
/// total payload size past it fail like a full disk.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.values().map(|payload| payload.len()).sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(quota) = self.quota_bytes {
            let existing = entries.get(key).map(|p| p.len()).unwrap_or(0);
            let projected = Self::used_bytes(&entries) - existing + payload.len();
            if projected > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    fn probe(&self) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            let entries = self.entries.lock().unwrap();
            if Self::used_bytes(&entries) + PROBE_PAYLOAD.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        Ok(())
    }
}
