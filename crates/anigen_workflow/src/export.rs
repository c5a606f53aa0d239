//! Assembly of the render request and the export call.

use crate::reconcile::SideMaps;
use anigen_core::{
    AudioRecords, BgmSettings, LinePosition, ParsedScript, Storyboard, VideoReference,
};
use anigen_error::{
    AnigenErrorKind, AnigenResult, ExportError, ExportErrorKind, ServiceErrorKind,
};
use anigen_services::{RenderLine, RenderRequest, RenderScene, RenderSubScene, VideoRenderer};
use std::sync::Arc;

/// Build the renderer payload.
///
/// Images come from the maps (empty when unassigned). Each line carries its
/// `audio_id` and whether its payload is in `audio_files`, which lists the
/// usable payloads in line order.
///
/// # Errors
///
/// [`ExportErrorKind::NoParsedScript`] without scenes and
/// [`ExportErrorKind::NoAudioAvailable`] without a single usable payload.
pub fn assemble(
    parsed: Option<&ParsedScript>,
    maps: &SideMaps<'_>,
    audio: &AudioRecords,
    bgm: Option<&BgmSettings>,
) -> AnigenResult<RenderRequest> {
    let Some(storyboard) = parsed
        .and_then(ParsedScript::storyboard)
        .filter(|s| !s.scenes.is_empty())
    else {
        return Err(ExportError::new(ExportErrorKind::NoParsedScript).into());
    };

    let mut audio_files = Vec::new();
    let mut scenes = Vec::with_capacity(storyboard.scenes.len());

    for (scene_idx, scene) in storyboard.scenes.iter().enumerate() {
        let key = Storyboard::scene_key(scene_idx, scene);
        let mut sub_scenes = Vec::with_capacity(scene.sub_scenes.len());

        for (sub_idx, sub) in scene.sub_scenes.iter().enumerate() {
            let mut storyboards = Vec::with_capacity(sub.storyboards.len());

            for (line_idx, line) in sub.storyboards.iter().enumerate() {
                let position = LinePosition {
                    scene: scene_idx,
                    sub_scene: sub_idx,
                    line: line_idx,
                };
                let audio_key = line.audio_key(position);
                let payload = audio.get(&audio_key).and_then(|r| r.payload());
                if let Some(payload) = payload {
                    audio_files.push(payload.to_string());
                }

                storyboards.push(RenderLine {
                    character: line.character.clone(),
                    expression: line.expression.clone(),
                    line: line.line.clone(),
                    character_image: maps
                        .character_images
                        .get(&line.character)
                        .cloned()
                        .unwrap_or_default(),
                    voice: line.voice.clone(),
                    audio_id: audio_key.to_string(),
                    has_audio: payload.is_some(),
                    extra: line.extra.clone(),
                });
            }

            sub_scenes.push(RenderSubScene {
                sub_scene_id: sub.sub_scene_id.clone(),
                camera_movement: sub.camera_movement.clone(),
                storyboards,
                extra: sub.extra.clone(),
            });
        }

        scenes.push(RenderScene {
            scene_id: scene.scene_id.clone(),
            scene_desc: scene.scene_desc.clone(),
            background: maps.background_images.get(&key).cloned().unwrap_or_default(),
            sub_scenes,
            extra: scene.extra.clone(),
        });
    }

    if audio_files.is_empty() {
        return Err(ExportError::new(ExportErrorKind::NoAudioAvailable).into());
    }

    tracing::debug!(
        scenes = scenes.len(),
        audio_files = audio_files.len(),
        has_bgm = bgm.is_some(),
        "Assembled render request"
    );
    Ok(RenderRequest {
        scenes,
        audio_files,
        bgm: bgm.cloned(),
    })
}

/// Sends assembled requests to the renderer.
#[derive(Clone)]
pub struct ExportAssembler {
    renderer: Arc<dyn VideoRenderer>,
}

impl std::fmt::Debug for ExportAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportAssembler").finish_non_exhaustive()
    }
}

impl ExportAssembler {
    /// Wrap a renderer.
    pub fn new(renderer: Arc<dyn VideoRenderer>) -> Self {
        Self { renderer }
    }

    /// Assemble and render. Preconditions are checked before any call.
    ///
    /// A renderer that answers without a video surfaces as
    /// [`ExportErrorKind::Renderer`]; transport and status failures pass
    /// through as service errors.
    #[tracing::instrument(skip_all)]
    pub async fn export(
        &self,
        parsed: Option<&ParsedScript>,
        maps: &SideMaps<'_>,
        audio: &AudioRecords,
        bgm: Option<&BgmSettings>,
    ) -> AnigenResult<VideoReference> {
        let request = assemble(parsed, maps, audio, bgm)?;
        tracing::info!(
            scenes = request.scenes.len(),
            audio_files = request.audio_files.len(),
            "Sending video data to renderer"
        );

        match self.renderer.render(&request).await {
            Ok(video) => {
                tracing::info!(video = %video, "Video rendered");
                Ok(video)
            }
            Err(e) => {
                tracing::error!(error = %e, "Video generation failed");
                let rejected = match e.kind() {
                    AnigenErrorKind::Service(service) => match &service.kind {
                        ServiceErrorKind::Rejected(message) => Some(message.clone()),
                        _ => None,
                    },
                    _ => None,
                };
                match rejected {
                    Some(message) => {
                        Err(ExportError::new(ExportErrorKind::Renderer(message)).into())
                    }
                    None => Err(e),
                }
            }
        }
    }
}
