//! Wire types for the service endpoints.

use anigen_core::{BgmSettings, SceneId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /parse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Raw script text
    pub text: String,
}

/// Body of `POST /generate_tts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Line to speak
    pub text: String,
    /// Voice short name from the catalog
    pub voice: String,
}

impl SpeechRequest {
    /// Create a request.
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
        }
    }
}

/// Body of `POST /render`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Scenes with images resolved and audio ids attached
    pub scenes: Vec<RenderScene>,
    /// Base64 audio data URIs in line order
    pub audio_files: Vec<String>,
    /// Background music, if any
    pub bgm: Option<RenderBgm>,
}

/// A scene as the renderer expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderScene {
    /// Parser-assigned identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<SceneId>,
    /// Free-text description
    pub scene_desc: String,
    /// Background image data URI, empty when unassigned
    pub background: String,
    /// Sub-scenes in order
    pub sub_scenes: Vec<RenderSubScene>,
    /// Parser fields passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sub-scene as the renderer expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSubScene {
    /// Parser-assigned identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_scene_id: Option<SceneId>,
    /// Camera movement hint
    pub camera_movement: String,
    /// Lines in order
    pub storyboards: Vec<RenderLine>,
    /// Parser fields passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A storyboard line as the renderer expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLine {
    /// Speaking character
    pub character: String,
    /// Facial expression hint
    pub expression: String,
    /// Spoken text
    pub line: String,
    /// Character image data URI, empty when unassigned
    pub character_image: String,
    /// Voice used for the line, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Key of the line's audio record
    pub audio_id: String,
    /// Whether an audio payload for this line is in `audio_files`
    pub has_audio: bool,
    /// Parser fields passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Background music entry of a render request.
///
/// Same shape as the stored settings.
pub type RenderBgm = BgmSettings;

/// Body returned by `POST /render`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderResponse {
    /// Path or URL of the rendered video
    #[serde(default)]
    pub video_file: Option<String>,
    /// Renderer's error message
    #[serde(default)]
    pub error: Option<String>,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Reported status, `healthy` when up
    #[serde(default)]
    pub status: String,
    /// Service name as the service reports it
    #[serde(default)]
    pub service: String,
}

impl HealthReport {
    /// Whether the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Error body `{ "error": "..." }` several endpoints send on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: Option<String>,
}
