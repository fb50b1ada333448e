//! Durable key-value storage behind the entry store.
//!
//! This module contains the storage abstraction the store persists through,
//! a file-backed implementation that keeps one JSON file per key in the data
//! directory, and an in-memory implementation for tests and embedding.

pub mod writer;

use crate::constants::{LOCK_FILE_NAME, SLOT_FILE_EXTENSION};
use crate::errors::{AppError, AppResult, PersistenceError};
use fs2::FileExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tempfile::NamedTempFile;
use tracing::debug;

pub use writer::PersistenceWriter;

/// A durable slot store addressed by string keys.
///
/// Implementations are shared with the background writer thread, so they must
/// be `Send + Sync`. `load` returns `Ok(None)` for a slot that was never written.
///
/// # Examples
///
/// ```
/// use moodlog::journal_io::{KeyValueStorage, MemoryStorage};
///
/// let storage = MemoryStorage::new();
/// assert_eq!(storage.load("root").unwrap(), None);
///
/// storage.save("root", b"[]").unwrap();
/// assert_eq!(storage.load("root").unwrap(), Some(b"[]".to_vec()));
/// ```
pub trait KeyValueStorage: Send + Sync {
    /// Reads the bytes stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Replaces the bytes stored under `key`.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError>;
}

/// Ensures the data directory exists, creating it if necessary.
///
/// Newly created directories get owner-only permissions on unix.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions =
                fs::Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}

/// Stores each key as `<data_dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the slot, so a reader never observes a half-written snapshot. Reads
/// and writes hold an advisory lock on a lock file in the data directory,
/// shared for reads and exclusive for writes.
#[derive(Debug)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Opens file storage rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Fails if the path is relative, the directory cannot be created, or the
    /// lock file cannot be opened (`AppError::Persistence`).
    pub fn open(data_dir: &Path) -> AppResult<Self> {
        ensure_data_directory_exists(data_dir)?;
        let storage = FileStorage {
            data_dir: data_dir.to_path_buf(),
        };
        storage.open_lock_file()?;
        Ok(storage)
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> io::Result<PathBuf> {
        validate_key(key)?;
        Ok(self
            .data_dir
            .join(format!("{}.{}", key, SLOT_FILE_EXTENSION)))
    }

    fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE_NAME)
    }

    fn open_lock_file(&self) -> Result<File, PersistenceError> {
        let path = self.lock_path();
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| PersistenceError::Lock { path, source })
    }

    fn write_slot(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut temp = NamedTempFile::new_in(&self.data_dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            let permissions =
                fs::Permissions::from_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
            temp.as_file().set_permissions(permissions)?;
        }

        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.slot_path(key).map_err(|source| PersistenceError::Read {
            key: key.to_string(),
            source,
        })?;

        let lock = self.open_lock_file()?;
        FileExt::lock_shared(&lock).map_err(|source| PersistenceError::Lock {
            path: self.lock_path(),
            source,
        })?;

        let result = match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read {
                key: key.to_string(),
                source,
            }),
        };

        let _ = FileExt::unlock(&lock);
        result
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        let path = self.slot_path(key).map_err(|source| PersistenceError::Write {
            key: key.to_string(),
            source,
        })?;

        let lock = self.open_lock_file()?;
        FileExt::lock_exclusive(&lock).map_err(|source| PersistenceError::Lock {
            path: self.lock_path(),
            source,
        })?;

        let result = self
            .write_slot(&path, bytes)
            .map_err(|source| PersistenceError::Write {
                key: key.to_string(),
                source,
            });

        let _ = FileExt::unlock(&lock);
        if result.is_ok() {
            debug!("Wrote {} bytes to slot '{}'", bytes.len(), key);
        }
        result
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> io::Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid storage key '{}'", key),
        ))
    }
}

/// Keeps slots in process memory.
///
/// Writes can be switched off with [`MemoryStorage::set_fail_writes`] to
/// simulate an unavailable device.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with `bytes` already stored under `key`.
    pub fn with_slot(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        storage.slots.lock().insert(key.to_string(), bytes.into());
        storage
    }

    /// Makes every subsequent `save` fail with `PersistenceError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable);
        }
        self.slots.lock().insert(key.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
