//! Durable slot storage for Anigen.
//!
//! The wizard keeps every intermediate artifact in a single key/value table so
//! a session survives restarts. This crate provides pluggable backends for that
//! table and a typed repository per slot on top of it.
//!
//! # Features
//!
//! - **Schema versioned**: a version bump wipes every slot, there is no migration
//! - **Atomic records**: each record is written to a temp file and renamed
//! - **Fallback**: when the directory cannot be opened the caller runs in memory
//!
//! # Example
//!
//! ```rust
//! use anigen_storage::{DurableStore, FileSystemStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let store = FileSystemStore::open(dir.path(), 3).await?;
//!
//! store.write("script", &serde_json::json!("Aki: hello")).await?;
//! let value = store.read("script").await?;
//! assert_eq!(value, Some(serde_json::json!("Aki: hello")));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use anigen_error::AnigenResult;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

mod filesystem;
mod memory;
mod repository;

pub use anigen_error::{StorageError, StorageErrorKind};
pub use filesystem::{FileSystemStore, MANIFEST_FILE, RECORD_DIR};
pub use memory::InMemoryStore;
pub use repository::{SlotChange, SlotChangeKind, SlotRepository};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 3;

/// Trait for pluggable key/value backends.
///
/// Opening is the backend's constructor. Values are JSON documents; typed
/// access goes through [`SlotRepository`].
#[async_trait::async_trait]
pub trait DurableStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &Value) -> AnigenResult<()>;

    /// Read the value under `key`.
    ///
    /// A missing key is `None`. Backends log unreadable records and report
    /// them as absent.
    async fn read(&self, key: &str) -> AnigenResult<Option<Value>>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> AnigenResult<()>;

    /// Remove every value.
    async fn clear(&self) -> AnigenResult<()>;

    /// Whether values outlive the process.
    fn is_persistent(&self) -> bool;
}

/// Open the file-system store, falling back to memory when it is unavailable.
///
/// Failures to open never stop the wizard; they are logged and the session
/// runs without persistence.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub async fn open_or_in_memory(
    path: impl AsRef<Path>,
    schema_version: u32,
) -> Arc<dyn DurableStore> {
    match FileSystemStore::open(path.as_ref(), schema_version).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "Durable store unavailable, continuing in memory only");
            Arc::new(InMemoryStore::new())
        }
    }
}
