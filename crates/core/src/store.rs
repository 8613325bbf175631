//! Whole-file JSON array persistence.
//!
//! Every dataset lives in a single file holding one JSON array. There is no index and no
//! caching: each read parses the whole file and each write replaces it.
//!
//! ## Write path
//!
//! Writes are serialised into a sibling `<file>.tmp` and renamed over the target, so readers see
//! either the previous array or the new one, never a partial file. If the rename fails the
//! temporary file is removed again.
//!
//! ## Locking
//!
//! Each [`JsonArrayStore`] carries a mutex shared by all of its clones. Read-modify-write cycles
//! ([`JsonArrayStore::update`], [`JsonArrayStore::append`]) hold it from the read until the write
//! has landed. The lock is process-local.

use crate::{CoreError, CoreResult};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

const EMPTY_ARRAY: &[u8] = b"[]";

/// A JSON array stored in one file.
#[derive(Clone, Debug)]
pub struct JsonArrayStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonArrayStore {
    /// Creates a store handle for `path`. Nothing is touched on disk until first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file as an empty array if it does not exist.
    ///
    /// An existing file is left alone even if its content is not valid JSON.
    ///
    /// # Errors
    /// Returns `CoreError::StorageDirCreation` if the parent directory cannot be created, or
    /// `CoreError::FileWrite` if the file cannot be created.
    pub fn ensure_initialized(&self) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(CoreError::StorageDirCreation)?;
            }
        }

        // create_new: a file written by another caller in the meantime must not be truncated
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                file.write_all(EMPTY_ARRAY).map_err(CoreError::FileWrite)?;
                tracing::debug!("initialised empty store: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(CoreError::FileWrite(e)),
        }
    }

    /// Reads and parses the whole array.
    ///
    /// # Errors
    /// Returns `CoreError::Parse` if the file exists but does not hold a JSON array of `T`.
    /// Corruption is surfaced, never replaced by an empty collection.
    pub fn read_all<T: DeserializeOwned>(&self) -> CoreResult<Vec<T>> {
        self.ensure_initialized()?;
        let bytes = fs::read(&self.path).map_err(CoreError::FileRead)?;
        serde_json::from_slice(&bytes).map_err(|source| CoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the whole array with `records`.
    pub fn write_all<T: Serialize>(&self, records: &[T]) -> CoreResult<()> {
        let _guard = self.acquire()?;
        self.write_unlocked(records)
    }

    /// Appends one record to the end of the array.
    pub fn append<T>(&self, record: T) -> CoreResult<()>
    where
        T: Serialize + DeserializeOwned,
    {
        self.update(|records: &mut Vec<T>| records.push(record))
    }

    /// Runs `f` over the current array and writes the result back, holding the store lock for
    /// the whole cycle.
    ///
    /// # Errors
    /// Returns any read, parse or write error. If `f` returns, its result is only handed back
    /// after the write succeeded.
    pub fn update<T, R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> CoreResult<R>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.acquire()?;
        let mut records = self.read_all::<T>()?;
        let out = f(&mut records);
        self.write_unlocked(&records)?;
        Ok(out)
    }

    /// Truncates the store back to an empty array.
    pub fn clear(&self) -> CoreResult<()> {
        self.write_all::<serde_json::Value>(&[])
    }

    fn acquire(&self) -> CoreResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| CoreError::LockPoisoned)
    }

    fn write_unlocked<T: Serialize>(&self, records: &[T]) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(CoreError::StorageDirCreation)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(records).map_err(CoreError::Serialization)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes).map_err(CoreError::FileWrite)?;
        if let Err(write_error) = fs::rename(&tmp, &self.path) {
            return match fs::remove_file(&tmp) {
                Ok(()) => Err(CoreError::FileWrite(write_error)),
                Err(cleanup_error) => Err(CoreError::CleanupAfterWriteFailed {
                    path: tmp,
                    write_error,
                    cleanup_error,
                }),
            };
        }

        tracing::debug!(
            "wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
