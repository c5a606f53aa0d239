//! File-system backend for the slot table.
//!
//! Layout:
//!
//! ```text
//! {base}/
//! ├── manifest.json          { "schema_version": 3 }
//! └── app_data/
//!     ├── script.json        { "key": "script", "data": "..." }
//!     └── parsed.json        { "key": "parsed", "data": { ... } }
//! ```

use crate::DurableStore;
use anigen_error::{AnigenResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Manifest file name under the base directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Directory holding one JSON file per record.
pub const RECORD_DIR: &str = "app_data";

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    schema_version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    key: String,
    data: Value,
}

/// Slot table kept as one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_path: PathBuf,
    schema_version: u32,
}

impl FileSystemStore {
    /// Open (or create) the store at `base_path` for `schema_version`.
    ///
    /// A missing manifest or an older stored version drops the record table
    /// and starts empty. A newer stored version is refused.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the directory cannot be created or read,
    /// the manifest cannot be written, or the stored schema is newer.
    #[tracing::instrument(skip(base_path), fields(path = %base_path.as_ref().display()))]
    pub async fn open(base_path: impl AsRef<Path>, schema_version: u32) -> AnigenResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        tokio::fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        let store = Self {
            base_path,
            schema_version,
        };

        match store.stored_version().await? {
            Some(stored) if stored == schema_version => {
                tracing::debug!(schema_version, "Opened existing store");
            }
            Some(stored) if stored > schema_version => {
                return Err(StorageError::new(StorageErrorKind::SchemaDowngrade {
                    stored,
                    requested: schema_version,
                })
                .into());
            }
            stored => {
                tracing::info!(
                    stored = ?stored,
                    requested = schema_version,
                    "Schema changed, dropping all slots"
                );
                store.recreate_table().await?;
                store.write_manifest().await?;
            }
        }

        tokio::fs::create_dir_all(store.record_dir()).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                store.record_dir().display(),
                e
            )))
        })?;

        Ok(store)
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Schema version the store was opened with.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    fn record_dir(&self) -> PathBuf {
        self.base_path.join(RECORD_DIR)
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.record_dir().join(format!("{}.json", key))
    }

    async fn stored_version(&self) -> AnigenResult<Option<u32>> {
        let path = self.base_path.join(MANIFEST_FILE);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        match serde_json::from_slice::<Manifest>(&bytes) {
            Ok(manifest) => Ok(Some(manifest.schema_version)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable manifest, treating store as new");
                Ok(None)
            }
        }
    }

    async fn write_manifest(&self) -> AnigenResult<()> {
        let manifest = Manifest {
            schema_version: self.schema_version,
        };
        let bytes = serde_json::to_vec_pretty(&manifest).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                key: MANIFEST_FILE.to_string(),
                message: e.to_string(),
            })
        })?;
        self.write_atomic(&self.base_path.join(MANIFEST_FILE), &bytes)
            .await
    }

    async fn recreate_table(&self) -> AnigenResult<()> {
        let dir = self.record_dir();
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                    "drop {}: {}",
                    dir.display(),
                    e
                )))
                .into());
            }
        }
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        Ok(())
    }

    // Temp file then rename, so a crash never leaves half a record
    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> AnigenResult<()> {
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DurableStore for FileSystemStore {
    #[tracing::instrument(skip(self, value))]
    async fn write(&self, key: &str, value: &Value) -> AnigenResult<()> {
        let record = Record {
            key: key.to_string(),
            data: value.clone(),
        };
        let bytes = serde_json::to_vec(&record).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;

        self.write_atomic(&self.record_path(key), &bytes).await?;
        tracing::debug!(size = bytes.len(), "Wrote record");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn read(&self, key: &str) -> AnigenResult<Option<Value>> {
        let path = self.record_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read record");
                return Ok(None);
            }
        };

        match serde_json::from_slice::<Record>(&bytes) {
            Ok(record) => Ok(Some(record.data)),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Corrupt record ignored");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: &str) -> AnigenResult<()> {
        let path = self.record_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Deleted record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "delete {}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn clear(&self) -> AnigenResult<()> {
        self.recreate_table().await?;
        tracing::info!(path = %self.base_path.display(), "Cleared all records");
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        true
    }
}
