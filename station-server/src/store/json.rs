//! JSON file store
//!
//! One pretty-printed JSON array per collection, read whole and written
//! whole. Writes go through a temp file + rename so a crashed write never
//! leaves a truncated collection, and every read-modify-write runs under
//! a per-collection async mutex so concurrent requests cannot lose
//! updates. Cross-collection sequences remain non-atomic.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::{StoreError, StoreResult};

/// The four record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Departments,
    Tasks,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Departments,
        Collection::Tasks,
        Collection::Notifications,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Users => "users.json",
            Collection::Departments => "departments.json",
            Collection::Tasks => "tasks.json",
            Collection::Notifications => "notifications.json",
        }
    }

    fn index(self) -> usize {
        match self {
            Collection::Users => 0,
            Collection::Departments => 1,
            Collection::Tasks => 2,
            Collection::Notifications => 3,
        }
    }
}

/// File-backed entity store
#[derive(Debug)]
pub struct JsonStore {
    data_dir: PathBuf,
    /// One read-modify-write lock per collection
    locks: [Mutex<()>; 4],
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            locks: [Mutex::new(()), Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory if missing
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Whether the collection file exists on disk
    pub async fn exists(&self, collection: Collection) -> bool {
        tokio::fs::try_exists(self.path(collection))
            .await
            .unwrap_or(false)
    }

    /// Load the full collection. A missing file reads as the empty
    /// collection.
    pub async fn load<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let path = self.path(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Write the full collection back (temp file + rename).
    pub async fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> StoreResult<()> {
        let path = self.path(collection);
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| StoreError::Encode {
            collection: collection.file_name(),
            source: e,
        })?;

        let tmp = self
            .data_dir
            .join(format!(".{}.tmp", collection.file_name()));
        let io_err = |path: &Path, source| StoreError::Io {
            path: path.display().to_string(),
            source,
        };
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| io_err(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_err(&path, e))?;
        Ok(())
    }

    /// Read-modify-write under the collection's lock.
    ///
    /// The closure mutates the loaded records; on `Ok` the whole
    /// collection is written back, on `Err` nothing is written. All
    /// mutations of a collection must go through here; plain
    /// [`load`](Self::load)/[`save`](Self::save) are for bootstrap and
    /// read paths.
    pub async fn modify<T, R, E, F>(&self, collection: Collection, f: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let _guard = self.locks[collection.index()].lock().await;
        let mut records: Vec<T> = self.load(collection).await?;
        let out = f(&mut records)?;
        self.save(collection, &records).await?;
        Ok(out)
    }
}
