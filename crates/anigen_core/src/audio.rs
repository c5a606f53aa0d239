//! Synthesized audio records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key of an audio record: a line's stable id or its position string.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct AudioKey(String);

impl AudioKey {
    /// Borrow the key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AudioKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Persisted synthesis state for one storyboard line.
///
/// Field names match the stored JSON (`audioData`, `isGenerating`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRecord {
    /// Key of the line this record belongs to
    pub id: AudioKey,
    /// Durable base64 data URI of the audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,
    /// Request in flight
    #[serde(default)]
    pub is_generating: bool,
    /// Failure message from the last attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Token of the request that owns this record; results carrying another
    /// token are stale
    #[serde(skip)]
    pub generation: u64,
}

impl AudioRecord {
    /// Record for a request that has just been issued.
    pub fn generating(id: AudioKey, generation: u64) -> Self {
        Self {
            id,
            audio_data: None,
            is_generating: true,
            error: None,
            generation,
        }
    }

    /// Record holding synthesized audio.
    pub fn succeeded(id: AudioKey, audio_data: String, generation: u64) -> Self {
        Self {
            id,
            audio_data: Some(audio_data),
            is_generating: false,
            error: None,
            generation,
        }
    }

    /// Record for a failed attempt.
    pub fn failed(id: AudioKey, error: impl Into<String>, generation: u64) -> Self {
        Self {
            id,
            audio_data: None,
            is_generating: false,
            error: Some(error.into()),
            generation,
        }
    }

    /// Audio payload usable for export: present and not marked as errored.
    pub fn payload(&self) -> Option<&str> {
        match (&self.audio_data, &self.error) {
            (Some(data), None) => Some(data),
            _ => None,
        }
    }

    /// Finished with audio and without error.
    pub fn is_ready(&self) -> bool {
        self.payload().is_some() && !self.is_generating
    }

    /// Whether "generate all" should (re)issue a request for this record.
    pub fn needs_generation(&self) -> bool {
        self.error.is_some() || self.audio_data.is_none()
    }
}

/// All audio records keyed by line.
pub type AudioRecords = BTreeMap<AudioKey, AudioRecord>;

/// Decoded audio held in memory only; rebuilt from the durable form on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// MIME type reported by the speech service
    pub mime_type: String,
    /// Raw audio bytes
    pub bytes: Arc<[u8]>,
}

impl AudioClip {
    /// Wrap decoded bytes.
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the clip holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
