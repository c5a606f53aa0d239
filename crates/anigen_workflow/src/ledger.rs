//! Audio records and their decoded clips, kept in step with the store.

use anigen_core::{
    AudioClip, AudioKey, AudioRecord, AudioRecords, decode_data_uri, encode_data_uri,
};
use anigen_error::{AnigenError, AnigenResult};
use anigen_storage::SlotRepository;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Message stored on a record whose audio could not be decoded on load.
pub const RESTORE_FAILED: &str = "Failed to restore audio, please regenerate";

#[derive(Debug, Default)]
struct Entries {
    records: AudioRecords,
    clips: HashMap<AudioKey, AudioClip>,
}

/// Shared audio state for one session.
///
/// Every request is issued under a fresh generation token; a result is only
/// applied when its record still exists and still carries that token.
/// Records are written through to the audio slot after every change.
#[derive(Debug, Clone)]
pub struct AudioLedger {
    entries: Arc<RwLock<Entries>>,
    next_generation: Arc<AtomicU64>,
    repository: SlotRepository<AudioRecords>,
    // Serializes snapshot + write so concurrent completions land in order
    persist_lock: Arc<Mutex<()>>,
}

/// What happened to a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Audio stored
    Stored,
    /// Failure recorded on the record
    Failed(String),
    /// Record deleted or reissued meanwhile; result dropped
    Stale,
}

impl AudioLedger {
    /// Load the stored records and rebuild their clips.
    ///
    /// Records left mid-request by an earlier run are reset. Audio that no
    /// longer decodes is kept but marked with [`RESTORE_FAILED`].
    #[tracing::instrument(skip(repository))]
    pub async fn load(repository: SlotRepository<AudioRecords>) -> AnigenResult<Self> {
        let mut records = repository.get().await?.unwrap_or_default();
        let mut clips = HashMap::new();
        let mut repaired = false;

        for (key, record) in records.iter_mut() {
            if record.is_generating {
                record.is_generating = false;
                repaired = true;
            }
            let Some(data) = &record.audio_data else {
                continue;
            };
            match decode_data_uri(data) {
                Some(decoded) if !decoded.bytes.is_empty() => {
                    clips.insert(key.clone(), AudioClip::new(decoded.mime_type, decoded.bytes));
                }
                _ => {
                    tracing::warn!(key = %key, "Failed to restore audio");
                    record.error = Some(RESTORE_FAILED.to_string());
                    repaired = true;
                }
            }
        }

        tracing::debug!(records = records.len(), clips = clips.len(), "Loaded audio records");
        let ledger = Self {
            entries: Arc::new(RwLock::new(Entries { records, clips })),
            next_generation: Arc::new(AtomicU64::new(1)),
            repository,
            persist_lock: Arc::new(Mutex::new(())),
        };
        if repaired {
            ledger.persist().await?;
        }
        Ok(ledger)
    }

    /// Snapshot of every record.
    pub async fn records(&self) -> AudioRecords {
        self.entries.read().await.records.clone()
    }

    /// Record for `key`, if any.
    pub async fn record(&self, key: &AudioKey) -> Option<AudioRecord> {
        self.entries.read().await.records.get(key).cloned()
    }

    /// Decoded clip for `key`, if any.
    pub async fn clip(&self, key: &AudioKey) -> Option<AudioClip> {
        self.entries.read().await.clips.get(key).cloned()
    }

    /// Mark `key` as generating under a fresh token and return the token.
    #[tracing::instrument(skip(self), fields(key = %key))]
    pub async fn begin(&self, key: &AudioKey) -> AnigenResult<u64> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        {
            let mut entries = self.entries.write().await;
            entries.clips.remove(key);
            entries
                .records
                .insert(key.clone(), AudioRecord::generating(key.clone(), generation));
        }
        self.persist().await?;
        Ok(generation)
    }

    /// Apply the outcome of the request issued under `generation`.
    #[tracing::instrument(skip(self, outcome), fields(key = %key))]
    pub async fn complete(
        &self,
        key: &AudioKey,
        generation: u64,
        outcome: Result<AudioClip, AnigenError>,
    ) -> AnigenResult<Completion> {
        let completion = {
            let mut entries = self.entries.write().await;
            let current = entries.records.get(key).map(|r| r.generation);
            if current != Some(generation) {
                tracing::debug!(generation, ?current, "Dropping stale result");
                return Ok(Completion::Stale);
            }

            match outcome {
                Ok(clip) => {
                    let data = encode_data_uri(&clip.mime_type, &clip.bytes);
                    entries.records.insert(
                        key.clone(),
                        AudioRecord::succeeded(key.clone(), data, generation),
                    );
                    entries.clips.insert(key.clone(), clip);
                    Completion::Stored
                }
                Err(e) => {
                    let message = e.user_message();
                    tracing::warn!(error = %message, "Speech generation failed");
                    entries.records.insert(
                        key.clone(),
                        AudioRecord::failed(key.clone(), message.clone(), generation),
                    );
                    Completion::Failed(message)
                }
            }
        };
        self.persist().await?;
        Ok(completion)
    }

    /// Forget one record and its clip. Returns whether it existed.
    pub async fn remove(&self, key: &AudioKey) -> AnigenResult<bool> {
        let existed = {
            let mut entries = self.entries.write().await;
            entries.clips.remove(key);
            entries.records.remove(key).is_some()
        };
        if existed {
            self.persist().await?;
        }
        Ok(existed)
    }

    /// Keep only the records whose key is in `keys`. Returns how many were
    /// dropped.
    pub async fn retain(&self, keys: &HashSet<AudioKey>) -> AnigenResult<usize> {
        let dropped = {
            let mut entries = self.entries.write().await;
            let before = entries.records.len();
            entries.records.retain(|key, _| keys.contains(key));
            entries.clips.retain(|key, _| keys.contains(key));
            before - entries.records.len()
        };
        if dropped > 0 {
            tracing::info!(dropped, "Dropped audio for lines no longer in the script");
            self.persist().await?;
        }
        Ok(dropped)
    }

    /// Forget every record and clip.
    pub async fn clear(&self) -> AnigenResult<()> {
        let _guard = self.persist_lock.lock().await;
        {
            let mut entries = self.entries.write().await;
            entries.records.clear();
            entries.clips.clear();
        }
        self.repository.delete().await
    }

    async fn persist(&self) -> AnigenResult<()> {
        let _guard = self.persist_lock.lock().await;
        let records = self.entries.read().await.records.clone();
        if records.is_empty() {
            self.repository.delete().await
        } else {
            self.repository.set(&records).await
        }
    }
}
