//! Parsed script tree returned by the parser service.
//!
//! The tree is coarse to fine: scenes hold sub-scenes, sub-scenes hold
//! storyboard lines. Fields the parser sends that are not modelled here are
//! kept in `extra` maps so a round trip through the store never drops them.

use crate::AudioKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of parsing a script: either a storyboard or the parser's error.
///
/// # Examples
///
/// ```
/// use anigen_core::ParsedScript;
///
/// let ok: ParsedScript = serde_json::from_str(r#"{"scenes": []}"#).unwrap();
/// assert!(ok.storyboard().is_some());
///
/// let failed: ParsedScript = serde_json::from_str(r#"{"error": "model offline"}"#).unwrap();
/// assert_eq!(failed.error(), Some("model offline"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedScript {
    /// Successfully parsed scenes
    Scenes(Storyboard),
    /// Parser reported an error
    Failed(ParseFailure),
}

impl ParsedScript {
    /// The storyboard, if parsing succeeded.
    pub fn storyboard(&self) -> Option<&Storyboard> {
        match self {
            Self::Scenes(storyboard) => Some(storyboard),
            Self::Failed(_) => None,
        }
    }

    /// Mutable access to the storyboard, if parsing succeeded.
    pub fn storyboard_mut(&mut self) -> Option<&mut Storyboard> {
        match self {
            Self::Scenes(storyboard) => Some(storyboard),
            Self::Failed(_) => None,
        }
    }

    /// The parser's error message, if parsing failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Scenes(_) => None,
            Self::Failed(failure) => Some(&failure.error),
        }
    }

    /// Whether there is at least one scene to work with.
    pub fn has_scenes(&self) -> bool {
        self.storyboard().is_some_and(|s| !s.scenes.is_empty())
    }
}

/// Error payload `{ "error": "..." }` from the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Message reported by the parser
    pub error: String,
}

/// Successfully parsed script.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Storyboard {
    /// Scenes in script order
    pub scenes: Vec<Scene>,
    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Scene identifier as sent by the parser, which uses numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(untagged)]
pub enum SceneId {
    /// Numeric identifier
    Number(i64),
    /// Textual identifier
    Text(String),
}

/// One scene of the storyboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Parser-assigned identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<SceneId>,
    /// Free-text description
    #[serde(default)]
    pub scene_desc: String,
    /// Background image data URI, derived from the background map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Sub-scenes in order
    #[serde(default)]
    pub sub_scenes: Vec<SubScene>,
    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A camera shot inside a scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScene {
    /// Parser-assigned identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_scene_id: Option<SceneId>,
    /// Camera movement hint (pan, zoom, static)
    #[serde(default)]
    pub camera_movement: String,
    /// Lines spoken during this shot
    #[serde(default)]
    pub storyboards: Vec<StoryboardLine>,
    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single spoken line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoryboardLine {
    /// Speaking character's name, used verbatim as map key
    #[serde(default)]
    pub character: String,
    /// Facial expression hint
    #[serde(default)]
    pub expression: String,
    /// Text to synthesize
    #[serde(default)]
    pub line: String,
    /// Character image data URI, derived from the character image map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_image: Option<String>,
    /// Voice identifier, derived from the voice map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Stable identifier assigned at parse time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoryboardLine {
    /// Key under which this line's audio record lives.
    ///
    /// Uses the stable `line_id` when present, else the position.
    pub fn audio_key(&self, position: LinePosition) -> AudioKey {
        match &self.line_id {
            Some(id) => AudioKey::from(id.clone()),
            None => AudioKey::from(position.to_string()),
        }
    }

    /// Whether the line has both text and a speaker.
    pub fn is_speakable(&self) -> bool {
        !self.line.trim().is_empty() && !self.character.is_empty()
    }
}

/// Position of a line in the tree: `(scene, sub_scene, line)` indices.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("{}-{}-{}", scene, sub_scene, line)]
pub struct LinePosition {
    /// Scene index
    pub scene: usize,
    /// Sub-scene index within the scene
    pub sub_scene: usize,
    /// Line index within the sub-scene
    pub line: usize,
}

impl Storyboard {
    /// Key used in the background map for the scene at `index`.
    ///
    /// The `scene_id` when present, else the index. Reordering scenes without
    /// ids moves their backgrounds with the index.
    pub fn scene_key(index: usize, scene: &Scene) -> String {
        scene
            .scene_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| index.to_string())
    }

    /// Every line with its position, in script order.
    pub fn lines(&self) -> impl Iterator<Item = (LinePosition, &StoryboardLine)> {
        self.scenes.iter().enumerate().flat_map(|(scene_idx, scene)| {
            scene
                .sub_scenes
                .iter()
                .enumerate()
                .flat_map(move |(sub_idx, sub)| {
                    sub.storyboards
                        .iter()
                        .enumerate()
                        .map(move |(line_idx, line)| {
                            (
                                LinePosition {
                                    scene: scene_idx,
                                    sub_scene: sub_idx,
                                    line: line_idx,
                                },
                                line,
                            )
                        })
                })
        })
    }

    /// Find a line by its audio key.
    pub fn find_line(&self, key: &AudioKey) -> Option<(LinePosition, &StoryboardLine)> {
        self.lines().find(|(pos, line)| &line.audio_key(*pos) == key)
    }

    /// Distinct character names in first-appearance order.
    pub fn unique_characters(&self) -> Vec<String> {
        let mut seen = Vec::<String>::new();
        for (_, line) in self.lines() {
            if !line.character.is_empty() && !seen.contains(&line.character) {
                seen.push(line.character.clone());
            }
        }
        seen
    }

    /// Number of lines that have both text and a speaker.
    pub fn speakable_line_count(&self) -> usize {
        self.lines().filter(|(_, line)| line.is_speakable()).count()
    }

    /// Give every line without a `line_id` a fresh UUID.
    ///
    /// Returns how many ids were assigned.
    pub fn assign_line_ids(&mut self) -> usize {
        let mut assigned = 0;
        for scene in &mut self.scenes {
            for sub in &mut scene.sub_scenes {
                for line in &mut sub.storyboards {
                    if line.line_id.is_none() {
                        line.line_id = Some(uuid::Uuid::new_v4().to_string());
                        assigned += 1;
                    }
                }
            }
        }
        assigned
    }
}
