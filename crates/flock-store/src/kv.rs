//! Key-value backend contract and implementations.
//!
//! The backend models browser-local storage: synchronous string get/set, a
//! fixed total capacity, last-writer-wins, and no notifications to other
//! observers.  Keys are short fixed names; values are whole JSON documents.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use flock_shared::constants::MAX_STORAGE_BYTES;

use crate::error::{Result, StoreError};

/// Storage backend contract.  `set` must fail with
/// [`StoreError::QuotaExceeded`] when the write would push the total stored
/// size (keys plus values) past the backend's capacity.
pub trait KvBackend: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// HashMap-backed store, mainly for tests.  Capacity is configurable so
/// quota behavior can be exercised without writing 50 MiB.
pub struct MemoryKv {
    entries: HashMap<String, String>,
    capacity: u64,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::with_capacity(MAX_STORAGE_BYTES)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    fn stored_bytes(&self) -> u64 {
        self.entries
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let replaced = self.entries.get(key).map(|v| (key.len() + v.len()) as u64);
        let attempted =
            self.stored_bytes() - replaced.unwrap_or(0) + (key.len() + value.len()) as u64;
        if attempted > self.capacity {
            return Err(StoreError::QuotaExceeded {
                attempted,
                capacity: self.capacity,
            });
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A shared handle to a backend, for a second surface (or a reopened
/// session) observing the same records.
impl<K: KvBackend> KvBackend for std::sync::Arc<std::sync::Mutex<K>> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.lock().unwrap_or_else(|e| e.into_inner()).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock().unwrap_or_else(|e| e.into_inner()).set(key, value)
    }
}

// ---------------------------------------------------------------------------
// File backend
// ---------------------------------------------------------------------------

/// One file per key under the platform data directory:
/// - Linux:   `~/.local/share/flock/<key>.json`
/// - macOS:   `~/Library/Application Support/com.flock.flock/<key>.json`
/// - Windows: `{FOLDERID_RoamingAppData}\flock\flock\data\<key>.json`
pub struct FileKv {
    dir: PathBuf,
    capacity: u64,
}

impl FileKv {
    /// Open (or create) the default application store directory.
    pub fn open() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "flock", "flock").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        tracing::info!(path = %data_dir.display(), "opening store");

        Self::open_at(data_dir)
    }

    /// Open a store rooted at an explicit directory.  Useful for tests and
    /// custom layouts.
    pub fn open_at(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            capacity: MAX_STORAGE_BYTES,
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn stored_bytes(&self) -> Result<u64> {
        let mut total = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                total += entry.metadata()?.len();
            }
        }
        Ok(total)
    }
}

impl KvBackend for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let existing = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };

        let attempted = self.stored_bytes()? - existing + value.len() as u64;
        if attempted > self.capacity {
            return Err(StoreError::QuotaExceeded {
                attempted,
                capacity: self.capacity,
            });
        }

        fs::write(path, value)?;
        Ok(())
    }
}
