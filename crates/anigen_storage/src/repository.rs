//! Typed access to one slot with change notification.

use crate::DurableStore;
use anigen_core::Slot;
use anigen_error::{AnigenResult, JsonError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::broadcast;

/// What happened to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChangeKind {
    /// A new value was written
    Set,
    /// The value was removed
    Deleted,
}

/// Notification sent after a slot is written or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotChange {
    /// Slot that changed
    pub slot: Slot,
    /// Kind of change
    pub kind: SlotChangeKind,
}

/// Repository for the entity stored in one [`Slot`].
///
/// All repositories built from the same sender share one change feed, so a
/// single subscriber sees every mutation.
///
/// # Example
///
/// ```rust
/// use anigen_core::{BgmSettings, Slot};
/// use anigen_storage::{InMemoryStore, SlotRepository};
/// use std::sync::Arc;
/// use tokio::sync::broadcast;
///
/// # async fn example() -> anigen_error::AnigenResult<()> {
/// let (changes, _) = broadcast::channel(16);
/// let repo = SlotRepository::<BgmSettings>::new(
///     Arc::new(InMemoryStore::new()),
///     Slot::BgmSettings,
///     changes,
/// );
///
/// repo.set(&BgmSettings::new("theme.mp3", "data:audio/mp3;base64,AA==")).await?;
/// assert!(repo.get().await?.is_some());
/// # Ok(())
/// # }
/// ```
pub struct SlotRepository<T> {
    store: Arc<dyn DurableStore>,
    slot: Slot,
    changes: broadcast::Sender<SlotChange>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for SlotRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            slot: self.slot,
            changes: self.changes.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SlotRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotRepository")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<T> SlotRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a repository for `slot` publishing to `changes`.
    pub fn new(
        store: Arc<dyn DurableStore>,
        slot: Slot,
        changes: broadcast::Sender<SlotChange>,
    ) -> Self {
        Self {
            store,
            slot,
            changes,
            _entity: PhantomData,
        }
    }

    /// Slot this repository manages.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Receive every change published on this repository's feed.
    pub fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.changes.subscribe()
    }

    /// Current value, or `None` when unset.
    ///
    /// A stored value that no longer matches the entity shape is logged and
    /// treated as unset.
    #[tracing::instrument(skip(self), fields(slot = %self.slot))]
    pub async fn get(&self) -> AnigenResult<Option<T>> {
        let Some(value) = self.store.read(self.slot.key()).await? else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) => {
                tracing::warn!(error = %e, "Stored value has unexpected shape, ignoring");
                Ok(None)
            }
        }
    }

    /// Replace the value and notify subscribers.
    #[tracing::instrument(skip(self, value), fields(slot = %self.slot))]
    pub async fn set(&self, value: &T) -> AnigenResult<()> {
        let json = serde_json::to_value(value)
            .map_err(|e| JsonError::context(self.slot.key(), e))?;
        self.store.write(self.slot.key(), &json).await?;
        self.notify(SlotChangeKind::Set);
        Ok(())
    }

    /// Remove the value and notify subscribers.
    #[tracing::instrument(skip(self), fields(slot = %self.slot))]
    pub async fn delete(&self) -> AnigenResult<()> {
        self.store.delete(self.slot.key()).await?;
        self.notify(SlotChangeKind::Deleted);
        Ok(())
    }

    fn notify(&self, kind: SlotChangeKind) {
        // No receivers is fine
        let _ = self.changes.send(SlotChange {
            slot: self.slot,
            kind,
        });
    }
}
