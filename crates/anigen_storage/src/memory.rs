//! In-memory backend.
//!
//! Used by tests and as the fallback when the durable directory cannot be
//! opened. All data is lost when the store is dropped.

use crate::DurableStore;
use anigen_error::AnigenResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Slot table held in a `HashMap` behind an `RwLock`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DurableStore for InMemoryStore {
    async fn write(&self, key: &str, value: &Value) -> AnigenResult<()> {
        self.records
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn read(&self, key: &str) -> AnigenResult<Option<Value>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> AnigenResult<()> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> AnigenResult<()> {
        self.records.write().await.clear();
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
