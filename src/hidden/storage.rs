//! Persistence backends for the hidden message record.
//!
//! A backend stores exactly one opaque record. The store decides what the
//! bytes mean; the backend only reads, replaces, or removes them whole.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::Result;

/// File name used for the persisted record when none is configured.
pub const DEFAULT_STATE_FILE: &str = "hidden.json";

/// Whole-record storage for the hidden message.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a store can be shared across
/// threads.
pub trait PersistenceBackend: Send + Sync + std::fmt::Debug {
    /// Reads the stored record.
    ///
    /// # Returns
    ///
    /// `Ok(Some(bytes))` if a record exists, `Ok(None)` if nothing has been
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    fn read_all(&self) -> Result<Option<Vec<u8>>>;

    /// Replaces the stored record with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. A failed write must leave the
    /// previous record readable.
    fn write_all(&self, bytes: &[u8]) -> Result<()>;

    /// Removes the stored record. Removing nothing succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing record cannot be removed.
    fn delete(&self) -> Result<()>;
}

impl<T: PersistenceBackend + ?Sized> PersistenceBackend for Arc<T> {
    fn read_all(&self) -> Result<Option<Vec<u8>>> {
        (**self).read_all()
    }

    fn write_all(&self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }

    fn delete(&self) -> Result<()> {
        (**self).delete()
    }
}

/// Single-file backend.
///
/// Writes land in a sibling `<name>.tmp` file that is synced to disk and
/// then renamed over the target, so a crash mid-write leaves either the old
/// record or the new one, never a torn file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates a backend that stores the record at `path`.
    ///
    /// Nothing touches the filesystem until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a backend for [`DEFAULT_STATE_FILE`] inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(DEFAULT_STATE_FILE))
    }

    /// Location of the persisted record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Writes and syncs `bytes` to `path`. The file handle is closed on every
/// exit path when it drops.
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl PersistenceBackend for FileBackend {
    fn read_all(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, bytes) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        remove_if_exists(&self.temp_path())?;
        remove_if_exists(&self.path)?;
        Ok(())
    }
}

/// In-memory backend for tests.
///
/// This backend is NOT persistent and should only be used in tests. Writes
/// can be made to fail to exercise I/O error handling.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: std::sync::RwLock<Option<Vec<u8>>>,
    fail_writes: std::sync::atomic::AtomicBool,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `bytes`.
    #[must_use]
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: std::sync::RwLock::new(Some(bytes.into())),
            fail_writes: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Makes subsequent writes and deletes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns a copy of the stored record.
    #[must_use]
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.read().ok().and_then(|data| data.clone())
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(io::Error::other("simulated write failure").into());
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl PersistenceBackend for MemoryBackend {
    fn read_all(&self) -> Result<Option<Vec<u8>>> {
        let data = self
            .data
            .read()
            .map_err(|e| super::HiddenError::Storage(e.to_string()))?;
        Ok(data.clone())
    }

    fn write_all(&self, bytes: &[u8]) -> Result<()> {
        self.check_writable()?;
        let mut data = self
            .data
            .write()
            .map_err(|e| super::HiddenError::Storage(e.to_string()))?;
        *data = Some(bytes.to_vec());
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        self.check_writable()?;
        let mut data = self
            .data
            .write()
            .map_err(|e| super::HiddenError::Storage(e.to_string()))?;
        *data = None;
        Ok(())
    }
}
