//! Local key-value persistence.
//!
//! Every collection is persisted as a JSON payload under a fixed string
//! key, mirroring browser-style local storage: synchronous, string-keyed,
//! whole-value writes. Two backends are provided - an in-memory map for
//! tests and ephemeral runs, and a single-file JSON store for real use.
//!
//! Malformed payloads are never an error: a collection that fails to decode
//! is read as empty (with a warning), so the application stays usable after
//! storage corruption.

mod backend;
pub mod keys;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by the storage layer.
///
/// Decode failures are deliberately absent: malformed stored data is
/// downgraded to "empty", never an error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (file backend).
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage.
    #[error("storage encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Typed adapter over a [`StorageBackend`].
///
/// Cheaply cloneable; clones share the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl Store {
    /// Wrap an explicit backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// An ephemeral in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Open (or create) a file-backed store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::new(FileStorage::open(path.as_ref())?))
    }

    /// Read the collection stored under `key`, if the key is set.
    ///
    /// Returns `None` for an unset key; a malformed payload is logged and
    /// also treated as unset, so callers that seed on absence will replace
    /// corrupt data with defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend I/O failures.
    pub fn read_collection_opt<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<Vec<T>>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(Some(records)),
            Err(err) => {
                tracing::warn!(key, %err, "malformed collection in storage, treating as empty");
                Ok(None)
            }
        }
    }

    /// Read the collection stored under `key`, empty if absent or
    /// malformed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend I/O failures.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        Ok(self.read_collection_opt(key)?.unwrap_or_default())
    }

    /// Overwrite the whole collection stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub fn write_collection<T: Serialize>(
        &self,
        key: &str,
        records: &[T],
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(key, &raw)
    }

    /// Read the single record stored under `key`, if any.
    ///
    /// A malformed payload is logged and read as absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend I/O failures.
    pub fn read_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                tracing::warn!(key, %err, "malformed record in storage, treating as absent");
                Ok(None)
            }
        }
    }

    /// Overwrite the single record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub fn write_record<T: Serialize>(&self, key: &str, record: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(record)?;
        self.backend.set(key, &raw)
    }

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }
}
