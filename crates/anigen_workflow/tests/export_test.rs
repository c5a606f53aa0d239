//! Tests for render request assembly and export.

mod test_utils;

use anigen_core::{
    AudioKey, AudioRecord, AudioRecords, BackgroundImageMap, BgmSettings, CharacterImageMap,
    VoiceMap, WizardStep,
};
use anigen_error::{AnigenErrorKind, ExportErrorKind};
use anigen_workflow::{SideMaps, StepView, assemble};
use test_utils::{MockParser, MockRenderer, MockSpeech, assign_voices, storyboard, wizard};

fn export_kind(err: &anigen_error::AnigenError) -> Option<ExportErrorKind> {
    match err.kind() {
        AnigenErrorKind::Export(e) => Some(e.kind.clone()),
        _ => None,
    }
}

#[test]
fn test_assemble_orders_payloads_and_marks_lines() {
    let mut parsed = storyboard(4);
    parsed.storyboard_mut().unwrap().assign_line_ids();
    let keys: Vec<AudioKey> = parsed
        .storyboard()
        .unwrap()
        .lines()
        .map(|(pos, line)| line.audio_key(pos))
        .collect();

    let mut audio = AudioRecords::new();
    audio.insert(
        keys[3].clone(),
        AudioRecord::succeeded(keys[3].clone(), "data:audio/mpeg;base64,Mw==".to_string(), 0),
    );
    audio.insert(
        keys[0].clone(),
        AudioRecord::succeeded(keys[0].clone(), "data:audio/mpeg;base64,MA==".to_string(), 0),
    );
    audio.insert(
        keys[1].clone(),
        AudioRecord::failed(keys[1].clone(), "voice offline", 0),
    );

    let mut images = CharacterImageMap::new();
    images.insert("Aki".to_string(), "data:image/png;base64,QUtJ".to_string());
    let mut backgrounds = BackgroundImageMap::new();
    backgrounds.insert("s2".to_string(), "data:image/png;base64,UzI=".to_string());
    let voices = VoiceMap::new();
    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };
    let bgm = BgmSettings::new("bgm.mp3", "data:audio/mp3;base64,AA==");

    let request = assemble(Some(&parsed), &maps, &audio, Some(&bgm)).unwrap();

    assert_eq!(
        request.audio_files,
        vec!["data:audio/mpeg;base64,MA==", "data:audio/mpeg;base64,Mw=="]
    );
    assert_eq!(request.scenes[0].background, "");
    assert_eq!(request.scenes[1].background, "data:image/png;base64,UzI=");

    let lines: Vec<_> = request
        .scenes
        .iter()
        .flat_map(|s| &s.sub_scenes)
        .flat_map(|s| &s.storyboards)
        .collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].has_audio);
    assert!(!lines[1].has_audio);
    assert!(!lines[2].has_audio);
    assert!(lines[3].has_audio);
    assert_eq!(lines[0].audio_id, keys[0].as_str());
    assert_eq!(lines[0].character_image, "data:image/png;base64,QUtJ");
    assert_eq!(lines[1].character_image, "");
    assert_eq!(request.bgm, Some(bgm));

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["scenes"][0]["scene_id"], "s1");
    assert_eq!(body["bgm"]["fileName"], "bgm.mp3");
    assert_eq!(body["scenes"][0]["sub_scenes"][0]["storyboards"][0]["has_audio"], true);
}

#[test]
fn test_assemble_preconditions() {
    let (images, backgrounds, voices) = (
        CharacterImageMap::new(),
        BackgroundImageMap::new(),
        VoiceMap::new(),
    );
    let maps = SideMaps {
        character_images: &images,
        background_images: &backgrounds,
        voices: &voices,
    };

    let err = assemble(None, &maps, &AudioRecords::new(), None).unwrap_err();
    assert_eq!(export_kind(&err), Some(ExportErrorKind::NoParsedScript));

    let empty: anigen_core::ParsedScript =
        serde_json::from_value(serde_json::json!({"scenes": []})).unwrap();
    let err = assemble(Some(&empty), &maps, &AudioRecords::new(), None).unwrap_err();
    assert_eq!(export_kind(&err), Some(ExportErrorKind::NoParsedScript));

    let err = assemble(Some(&storyboard(3)), &maps, &AudioRecords::new(), None).unwrap_err();
    assert_eq!(export_kind(&err), Some(ExportErrorKind::NoAudioAvailable));
}

#[tokio::test]
async fn test_export_without_audio_never_calls_renderer() {
    let parser = MockParser::new(storyboard(3));
    let speech = MockSpeech::new();
    let renderer = MockRenderer::new();
    let wizard = wizard(&parser, &speech, &renderer).await;

    wizard.submit_script("three lines").await.unwrap();
    let err = wizard.export_video().await.unwrap_err();

    assert_eq!(export_kind(&err), Some(ExportErrorKind::NoAudioAvailable));
    assert!(renderer.requests().is_empty());
    assert!(wizard.session().video.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_export_stores_video_reference() {
    let parser = MockParser::new(storyboard(3));
    let speech = MockSpeech::new();
    let renderer = MockRenderer::new();
    let wizard = wizard(&parser, &speech, &renderer).await;

    wizard.submit_script("three lines").await.unwrap();
    assign_voices(&wizard).await;
    wizard.generate_all_speech().await.unwrap();

    let video = wizard.export_video().await.unwrap();
    assert_eq!(video.as_str(), "/videos/output.mp4");
    assert_eq!(renderer.requests().len(), 1);
    assert_eq!(renderer.requests()[0].audio_files.len(), 3);

    let stored = wizard.session().video.get().await.unwrap();
    assert_eq!(stored, Some(video.clone()));

    let StepView::VideoExport(summary) = wizard.view_of(WizardStep::VideoExport).await.unwrap()
    else {
        panic!("expected the export view");
    };
    assert_eq!(summary.available_audio, 3);
    assert_eq!(summary.expected_audio, 3);
    assert!(!summary.is_ready());
    assert_eq!(summary.video, Some(video));

    wizard.clear_video().await.unwrap();
    assert!(wizard.session().video.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_renderer_error_body_surfaces_message() {
    let parser = MockParser::new(storyboard(2));
    let speech = MockSpeech::new();
    let renderer = MockRenderer::rejecting("ffmpeg exploded");
    let wizard = wizard(&parser, &speech, &renderer).await;

    wizard.submit_script("two lines").await.unwrap();
    assign_voices(&wizard).await;
    wizard.generate_all_speech().await.unwrap();

    let err = wizard.export_video().await.unwrap_err();
    assert_eq!(
        export_kind(&err),
        Some(ExportErrorKind::Renderer("ffmpeg exploded".to_string()))
    );
    assert_eq!(err.user_message(), "Failed to generate video: ffmpeg exploded");
    assert!(wizard.session().video.get().await.unwrap().is_none());
}
