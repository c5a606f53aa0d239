//! Tests for merging side maps into the parsed script.

use anigen_core::{BackgroundImageMap, CharacterImageMap, ParsedScript, VoiceMap};
use anigen_workflow::{SideMaps, reconcile};
use serde_json::json;
use std::borrow::Cow;

fn parsed() -> ParsedScript {
    serde_json::from_value(json!({
        "scenes": [
            {
                "scene_id": "s1",
                "scene_desc": "Rooftop",
                "sub_scenes": [{
                    "camera_movement": "pan",
                    "storyboards": [
                        {"character": "Aki", "expression": "calm", "line": "It's late."},
                        {"character": "Ren", "expression": "tired", "line": "I know."}
                    ]
                }]
            },
            {
                "scene_desc": "Classroom",
                "sub_scenes": [{
                    "camera_movement": "static",
                    "storyboards": [
                        {"character": "Aki", "expression": "happy", "line": "Morning!"}
                    ]
                }]
            }
        ]
    }))
    .unwrap()
}

#[test]
fn test_background_follows_map_entry() {
    let script = parsed();
    let images = CharacterImageMap::new();
    let voices = VoiceMap::new();
    let mut backgrounds = BackgroundImageMap::new();
    backgrounds.insert("s1".to_string(), "data:image/png;base64,QQ==".to_string());

    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };
    let merged = reconcile(&script, &maps).into_owned();
    let scene = &merged.storyboard().unwrap().scenes[0];
    assert_eq!(scene.background.as_deref(), Some("data:image/png;base64,QQ=="));

    backgrounds.insert("s1".to_string(), "data:image/png;base64,Qg==".to_string());
    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };
    let updated = reconcile(&merged, &maps);
    assert!(matches!(updated, Cow::Owned(_)));
    let scene = &updated.storyboard().unwrap().scenes[0];
    assert_eq!(scene.background.as_deref(), Some("data:image/png;base64,Qg=="));
}

#[test]
fn test_second_pass_reports_unchanged() {
    let script = parsed();
    let mut images = CharacterImageMap::new();
    images.insert("Aki".to_string(), "data:image/png;base64,QUtJ".to_string());
    let mut backgrounds = BackgroundImageMap::new();
    backgrounds.insert("1".to_string(), "data:image/png;base64,Q0w=".to_string());
    let mut voices = VoiceMap::new();
    voices.insert("Ren".to_string(), "en-US-GuyNeural".to_string());

    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };
    let first = reconcile(&script, &maps).into_owned();
    let second = reconcile(&first, &maps);

    assert!(matches!(second, Cow::Borrowed(_)));
    assert_eq!(*second, first);
}

#[test]
fn test_characters_and_index_keyed_scenes_are_merged() {
    let script = parsed();
    let mut images = CharacterImageMap::new();
    images.insert("Aki".to_string(), "data:image/png;base64,QUtJ".to_string());
    let mut backgrounds = BackgroundImageMap::new();
    backgrounds.insert("1".to_string(), "data:image/png;base64,Q0w=".to_string());
    let mut voices = VoiceMap::new();
    voices.insert("Ren".to_string(), "en-US-GuyNeural".to_string());

    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };
    let merged = reconcile(&script, &maps);
    let storyboard = merged.storyboard().unwrap();

    let lines: Vec<_> = storyboard.lines().map(|(_, line)| line).collect();
    assert_eq!(lines[0].character_image.as_deref(), Some("data:image/png;base64,QUtJ"));
    assert_eq!(lines[0].voice, None);
    assert_eq!(lines[1].character_image, None);
    assert_eq!(lines[1].voice.as_deref(), Some("en-US-GuyNeural"));
    assert_eq!(lines[2].character_image.as_deref(), Some("data:image/png;base64,QUtJ"));
    assert_eq!(storyboard.scenes[0].background, None);
    assert_eq!(
        storyboard.scenes[1].background.as_deref(),
        Some("data:image/png;base64,Q0w=")
    );
}

#[test]
fn test_removed_entry_clears_derived_field() {
    let script = parsed();
    let mut images = CharacterImageMap::new();
    images.insert("Aki".to_string(), "data:image/png;base64,QUtJ".to_string());
    let (backgrounds, voices) = (BackgroundImageMap::new(), VoiceMap::new());
    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };
    let merged = reconcile(&script, &maps).into_owned();

    let empty = CharacterImageMap::new();
    let maps = SideMaps {
        character_images: &empty,
        background_images: &backgrounds,
        voices: &voices,
    };
    let cleared = reconcile(&merged, &maps);
    assert!(matches!(cleared, Cow::Owned(_)));
    assert!(
        cleared
            .storyboard()
            .unwrap()
            .lines()
            .all(|(_, line)| line.character_image.is_none())
    );
    assert_eq!(*cleared, script);
}

#[test]
fn test_parser_error_is_left_alone() {
    let failed: ParsedScript = serde_json::from_value(json!({"error": "model offline"})).unwrap();
    let mut images = CharacterImageMap::new();
    images.insert("Aki".to_string(), "data:image/png;base64,QUtJ".to_string());
    let (backgrounds, voices) = (BackgroundImageMap::new(), VoiceMap::new());
    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };

    assert!(matches!(reconcile(&failed, &maps), Cow::Borrowed(_)));
}
