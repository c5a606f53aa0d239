//! Merge the independently edited side maps into the parsed script.
//!
//! The parsed script carries copies of the chosen background, character image
//! and voice so downstream steps read one structure. Those copies are derived:
//! after [`reconcile`] each one equals the current map entry, or is absent when
//! the map has none.

use anigen_core::{
    BackgroundImageMap, CharacterImageMap, LinePosition, ParsedScript, Storyboard,
    StoryboardLine, VoiceMap,
};
use std::borrow::Cow;

/// Borrowed view of the three maps reconciliation reads.
#[derive(Debug, Clone, Copy)]
pub struct SideMaps<'a> {
    /// Character name → image
    pub character_images: &'a CharacterImageMap,
    /// Scene key → background image
    pub background_images: &'a BackgroundImageMap,
    /// Character name → voice
    pub voices: &'a VoiceMap,
}

/// Bring every derived field of `parsed` in line with `maps`.
///
/// Returns `Cow::Borrowed` when nothing differs, so callers can skip the
/// write. The first difference clones the script; later ones edit the clone.
/// A parser error payload is returned unchanged.
///
/// # Examples
///
/// ```
/// use anigen_core::{BackgroundImageMap, CharacterImageMap, ParsedScript, VoiceMap};
/// use anigen_workflow::{SideMaps, reconcile};
/// use std::borrow::Cow;
///
/// let parsed: ParsedScript = serde_json::from_str(
///     r#"{"scenes": [{"scene_id": "s1", "scene_desc": "", "sub_scenes": []}]}"#,
/// ).unwrap();
/// let mut backgrounds = BackgroundImageMap::new();
/// backgrounds.insert("s1".to_string(), "data:image/png;base64,QQ==".to_string());
/// let (images, voices) = (CharacterImageMap::new(), VoiceMap::new());
/// let maps = SideMaps { character_images: &images, background_images: &backgrounds, voices: &voices };
///
/// let merged = reconcile(&parsed, &maps);
/// assert!(matches!(merged, Cow::Owned(_)));
/// assert!(matches!(reconcile(&merged, &maps), Cow::Borrowed(_)));
/// ```
pub fn reconcile<'p>(parsed: &'p ParsedScript, maps: &SideMaps<'_>) -> Cow<'p, ParsedScript> {
    let mut result = Cow::Borrowed(parsed);
    let Some(storyboard) = parsed.storyboard() else {
        return result;
    };

    for (scene_idx, scene) in storyboard.scenes.iter().enumerate() {
        let key = Storyboard::scene_key(scene_idx, scene);
        let background = maps.background_images.get(&key);
        if scene.background.as_ref() != background
            && let Some(target) = result
                .to_mut()
                .storyboard_mut()
                .and_then(|s| s.scenes.get_mut(scene_idx))
        {
            target.background = background.cloned();
        }
    }

    for (position, line) in storyboard.lines() {
        let image = maps.character_images.get(&line.character);
        if line.character_image.as_ref() != image
            && let Some(target) = line_mut(&mut result, position)
        {
            target.character_image = image.cloned();
        }

        let voice = maps.voices.get(&line.character);
        if line.voice.as_ref() != voice
            && let Some(target) = line_mut(&mut result, position)
        {
            target.voice = voice.cloned();
        }
    }

    if matches!(result, Cow::Owned(_)) {
        tracing::debug!("Reconciled parsed script with side maps");
    }
    result
}

fn line_mut<'a>(
    result: &'a mut Cow<'_, ParsedScript>,
    position: LinePosition,
) -> Option<&'a mut StoryboardLine> {
    result
        .to_mut()
        .storyboard_mut()?
        .scenes
        .get_mut(position.scene)?
        .sub_scenes
        .get_mut(position.sub_scene)?
        .storyboards
        .get_mut(position.line)
}
