//! The five-step wizard over a persisted session.

use crate::export::ExportAssembler;
use crate::ledger::{AudioLedger, Completion};
use crate::reconcile::{SideMaps, reconcile};
use crate::session::Session;
use crate::settings::{Services, WizardSettings};
use crate::speech::{SpeechDriver, SpeechReport, SpeechTask, eligible_tasks, pending_tasks};
use crate::upload::{UploadKind, read_upload};
use crate::view::{StepView, ViewInputs};
use anigen_core::{
    AudioKey, BackgroundImageMap, BgmSettings, CharacterImageMap, LinePosition, ParsedScript,
    Storyboard, VideoReference, VoiceMap, WizardStep, find_voice,
};
use anigen_error::{
    AnigenResult, ExportError, ExportErrorKind, StorageError, StorageErrorKind, WizardError,
    WizardErrorKind,
};
use anigen_services::HealthReport;
use anigen_storage::SlotChange;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tokio::sync::broadcast;

/// Resolve a step from a 1-based number or its name (`voice-bgm-selection`).
///
/// # Examples
///
/// ```
/// use anigen_core::WizardStep;
/// use anigen_workflow::parse_step;
///
/// assert_eq!(parse_step("2").unwrap(), WizardStep::PickerAssignment);
/// assert_eq!(parse_step("video-export").unwrap(), WizardStep::VideoExport);
/// assert!(parse_step("6").is_err());
/// ```
pub fn parse_step(input: &str) -> AnigenResult<WizardStep> {
    let input = input.trim();
    let step = match input.parse::<usize>() {
        Ok(number) => number.checked_sub(1).and_then(WizardStep::from_index),
        Err(_) => WizardStep::from_str(input).ok(),
    };
    step.ok_or_else(|| WizardError::new(WizardErrorKind::UnknownStep(input.to_string())).into())
}

/// Drives a session through script entry, image and voice assignment, speech
/// generation and export.
///
/// Every action persists through the session's slot repositories. Actions
/// that touch a side map re-run reconciliation and write the parsed script
/// back only when it changed.
#[derive(Debug, Clone)]
pub struct Wizard {
    session: Session,
    services: Services,
    settings: WizardSettings,
    ledger: AudioLedger,
    driver: SpeechDriver,
    exporter: ExportAssembler,
}

impl Wizard {
    /// Open a wizard over `session`, restoring stored audio.
    #[tracing::instrument(skip_all, fields(persistent = session.is_persistent()))]
    pub async fn open(
        session: Session,
        services: Services,
        settings: WizardSettings,
    ) -> AnigenResult<Self> {
        let ledger = AudioLedger::load(session.audio.clone()).await?;
        let driver = SpeechDriver::new(services.speech.clone())
            .with_batch_size(*settings.batch_size())
            .with_batch_pause(*settings.batch_pause());
        let exporter = ExportAssembler::new(services.renderer.clone());

        Ok(Self {
            session,
            services,
            settings,
            ledger,
            driver,
            exporter,
        })
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Audio records and clips.
    pub fn ledger(&self) -> &AudioLedger {
        &self.ledger
    }

    /// Settings in effect.
    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    /// Receive a notification for every slot mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.session.subscribe()
    }

    // ---- Navigation ----

    /// Current step; the first one for a fresh session.
    pub async fn step(&self) -> AnigenResult<WizardStep> {
        Ok(self.session.step.get().await?.unwrap_or_default())
    }

    /// Jump to any step.
    pub async fn select(&self, step: WizardStep) -> AnigenResult<()> {
        tracing::debug!(step = %step, "Selecting step");
        self.session.step.set(&step).await
    }

    /// Continue to the next step and return it. The last step stays put.
    ///
    /// Leaving script entry requires a stored parse result.
    pub async fn advance(&self) -> AnigenResult<WizardStep> {
        let current = self.step().await?;
        if current == WizardStep::ScriptEntry && self.session.parsed.get().await?.is_none() {
            return Err(ExportError::new(ExportErrorKind::NoParsedScript).into());
        }
        let next = current.next().unwrap_or(current);
        self.select(next).await?;
        Ok(next)
    }

    /// State for the current step.
    pub async fn view(&self) -> AnigenResult<StepView> {
        let step = self.step().await?;
        self.view_of(step).await
    }

    /// State for `step`, regardless of the current one.
    pub async fn view_of(&self, step: WizardStep) -> AnigenResult<StepView> {
        let script = self.session.script.get().await?.unwrap_or_default();
        let parsed = self.session.parsed.get().await?;
        let (character_images, background_images, voices) = self.side_maps().await?;
        let bgm = self.session.bgm.get().await?;
        let audio = self.ledger.records().await;
        let video = self.session.video.get().await?;

        let inputs = ViewInputs {
            script: &script,
            parsed: parsed.as_ref(),
            character_images: &character_images,
            background_images: &background_images,
            voices: &voices,
            bgm: bgm.as_ref(),
            audio: &audio,
            video: video.as_ref(),
        };
        Ok(StepView::build(step, &inputs))
    }

    // ---- Script ----

    /// Store the script, parse it and move to the picker.
    ///
    /// Changed text clears everything derived from the previous script
    /// before the parser is called. Resubmitting identical text keeps the
    /// side maps and the audio of lines that did not move, since those keep
    /// their ids.
    /// A parser error payload is stored like a result; a failed call leaves
    /// the step unchanged.
    #[tracing::instrument(skip(self, text), fields(len = text.len()))]
    pub async fn submit_script(&self, text: &str) -> AnigenResult<ParsedScript> {
        if text.trim().is_empty() {
            return Err(WizardError::new(WizardErrorKind::EmptyScript).into());
        }

        let previous_text = self.session.script.get().await?;
        let previous = if previous_text.as_deref() == Some(text) {
            self.session.parsed.get().await?
        } else {
            tracing::info!("Script changed, clearing derived state");
            self.ledger.clear().await?;
            self.session.clear_downstream().await?;
            self.session.script.set(&text.to_string()).await?;
            None
        };

        let mut parsed = self.services.parser.parse(text).await?;
        if let Some(storyboard) = parsed.storyboard_mut() {
            if let Some(old) = previous.as_ref().and_then(ParsedScript::storyboard) {
                carry_line_ids(storyboard, old);
            }
            let assigned = storyboard.assign_line_ids();
            tracing::info!(
                scenes = storyboard.scenes.len(),
                assigned,
                "Script parsed"
            );
        } else if let Some(error) = parsed.error() {
            tracing::warn!(error, "Parser reported an error");
        }

        let (character_images, background_images, voices) = self.side_maps().await?;
        let maps = SideMaps {
            character_images: &character_images,
            background_images: &background_images,
            voices: &voices,
        };
        let merged = reconcile(&parsed, &maps).into_owned();
        self.session.parsed.set(&merged).await?;
        if let Some(storyboard) = merged.storyboard() {
            let keys = storyboard
                .lines()
                .map(|(position, line)| line.audio_key(position))
                .collect();
            self.ledger.retain(&keys).await?;
        }
        self.select(WizardStep::PickerAssignment).await?;
        Ok(merged)
    }

    // ---- Images ----

    /// Assign the image at `path` to `character`.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn set_character_image(&self, character: &str, path: &Path) -> AnigenResult<()> {
        self.require_character(character).await?;
        let upload =
            read_upload(path, UploadKind::Image, self.settings.upload_policy()).await?;

        let mut images = self.session.character_images.get().await?.unwrap_or_default();
        images.insert(character.to_string(), upload.data_uri);
        self.session.character_images.set(&images).await?;
        tracing::info!(character, size = upload.size, "Character image assigned");
        self.reconcile_stored().await
    }

    /// Remove the image of `character`. Returns whether one was assigned.
    pub async fn remove_character_image(&self, character: &str) -> AnigenResult<bool> {
        let mut images = self.session.character_images.get().await?.unwrap_or_default();
        if images.remove(character).is_none() {
            return Ok(false);
        }
        self.session.character_images.set(&images).await?;
        self.reconcile_stored().await?;
        Ok(true)
    }

    /// Assign the image at `path` as background of the scene keyed `scene_key`.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn set_background_image(&self, scene_key: &str, path: &Path) -> AnigenResult<()> {
        self.require_scene(scene_key).await?;
        let upload =
            read_upload(path, UploadKind::Image, self.settings.upload_policy()).await?;

        let mut backgrounds = self.session.background_images.get().await?.unwrap_or_default();
        backgrounds.insert(scene_key.to_string(), upload.data_uri);
        self.session.background_images.set(&backgrounds).await?;
        tracing::info!(scene_key, size = upload.size, "Background assigned");
        self.reconcile_stored().await
    }

    /// Remove the background of `scene_key`. Returns whether one was assigned.
    pub async fn remove_background_image(&self, scene_key: &str) -> AnigenResult<bool> {
        let mut backgrounds = self.session.background_images.get().await?.unwrap_or_default();
        if backgrounds.remove(scene_key).is_none() {
            return Ok(false);
        }
        self.session.background_images.set(&backgrounds).await?;
        self.reconcile_stored().await?;
        Ok(true)
    }

    // ---- Voices and BGM ----

    /// Give `character` the catalog voice `voice`.
    #[tracing::instrument(skip(self))]
    pub async fn set_voice(&self, character: &str, voice: &str) -> AnigenResult<()> {
        if find_voice(voice).is_none() {
            return Err(WizardError::new(WizardErrorKind::UnknownVoice(voice.to_string())).into());
        }
        self.require_character(character).await?;

        let mut voices = self.session.voices.get().await?.unwrap_or_default();
        voices.insert(character.to_string(), voice.to_string());
        self.session.voices.set(&voices).await?;
        tracing::info!("Voice assigned");
        self.reconcile_stored().await
    }

    /// Remove the voice of `character`. Returns whether one was assigned.
    pub async fn clear_voice(&self, character: &str) -> AnigenResult<bool> {
        let mut voices = self.session.voices.get().await?.unwrap_or_default();
        if voices.remove(character).is_none() {
            return Ok(false);
        }
        self.session.voices.set(&voices).await?;
        self.reconcile_stored().await?;
        Ok(true)
    }

    /// Remove every voice assignment.
    pub async fn clear_voices(&self) -> AnigenResult<()> {
        self.session.voices.delete().await?;
        tracing::info!("All voices cleared");
        self.reconcile_stored().await
    }

    /// Use the audio file at `path` as background music, at default volume.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn set_bgm(&self, path: &Path) -> AnigenResult<BgmSettings> {
        let upload = read_upload(path, UploadKind::Bgm, self.settings.upload_policy()).await?;
        let bgm = BgmSettings::new(upload.file_name, upload.data_uri);
        self.session.bgm.set(&bgm).await?;
        tracing::info!(file_name = %bgm.file_name, size = upload.size, "Background music set");
        Ok(bgm)
    }

    /// Change the background music volume, clamped to `0.0..=1.0`.
    pub async fn set_bgm_volume(&self, volume: f32) -> AnigenResult<BgmSettings> {
        let Some(bgm) = self.session.bgm.get().await? else {
            return Err(WizardError::new(WizardErrorKind::NoBgm).into());
        };
        let bgm = bgm.with_volume(volume);
        self.session.bgm.set(&bgm).await?;
        Ok(bgm)
    }

    /// Drop the background music.
    pub async fn remove_bgm(&self) -> AnigenResult<()> {
        self.session.bgm.delete().await
    }

    // ---- Speech ----

    /// Synthesize every eligible line that has no usable audio yet.
    pub async fn generate_all_speech(&self) -> AnigenResult<SpeechReport> {
        let storyboard = self.load_storyboard().await?;
        let voices = self.session.voices.get().await?.unwrap_or_default();
        let records = self.ledger.records().await;
        let tasks = pending_tasks(eligible_tasks(&storyboard, &voices), &records);
        if tasks.is_empty() {
            tracing::info!("No lines need audio");
        }
        Ok(self.driver.run(&tasks, &self.ledger).await)
    }

    /// Synthesize one line again, whatever its current state.
    #[tracing::instrument(skip(self), fields(key = %key))]
    pub async fn regenerate_line(&self, key: &AudioKey) -> AnigenResult<Completion> {
        let storyboard = self.load_storyboard().await?;
        let Some((_, line)) = storyboard.find_line(key) else {
            return Err(WizardError::new(WizardErrorKind::UnknownLine(key.to_string())).into());
        };
        let voices = self.session.voices.get().await?.unwrap_or_default();
        let Some(voice) = voices.get(&line.character) else {
            return Err(WizardError::new(WizardErrorKind::VoiceNotSelected(
                line.character.clone(),
            ))
            .into());
        };

        let task = SpeechTask {
            key: key.clone(),
            text: line.line.clone(),
            voice: voice.clone(),
        };
        Ok(self.driver.run_one(&task, &self.ledger).await)
    }

    /// Delete the audio of one line. Returns whether there was any.
    pub async fn delete_audio(&self, key: &AudioKey) -> AnigenResult<bool> {
        self.ledger.remove(key).await
    }

    /// Delete every audio record.
    pub async fn clear_audio(&self) -> AnigenResult<()> {
        self.ledger.clear().await?;
        tracing::info!("All audio cleared");
        Ok(())
    }

    /// Write the clip of one line to `path` and return its size.
    ///
    /// Fails with [`WizardErrorKind::ClipTimeout`] when the write does not
    /// finish within the configured readiness timeout.
    #[tracing::instrument(skip(self, path), fields(key = %key, path = %path.display()))]
    pub async fn save_clip(&self, key: &AudioKey, path: &Path) -> AnigenResult<usize> {
        let Some(clip) = self.ledger.clip(key).await else {
            return Err(WizardError::new(WizardErrorKind::NoAudio(key.to_string())).into());
        };

        let write = tokio::fs::write(path, &clip.bytes);
        match tokio::time::timeout(*self.settings.clip_ready_timeout(), write).await {
            Ok(Ok(())) => {
                tracing::debug!(bytes = clip.len(), "Clip written");
                Ok(clip.len())
            }
            Ok(Err(e)) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
            Err(_) => {
                tracing::warn!("Clip write timed out");
                Err(WizardError::new(WizardErrorKind::ClipTimeout(key.to_string())).into())
            }
        }
    }

    // ---- Export ----

    /// Render the video and store its reference.
    pub async fn export_video(&self) -> AnigenResult<VideoReference> {
        let parsed = self.session.parsed.get().await?;
        let (character_images, background_images, voices) = self.side_maps().await?;
        let maps = SideMaps {
            character_images: &character_images,
            background_images: &background_images,
            voices: &voices,
        };
        let audio = self.ledger.records().await;
        let bgm = self.session.bgm.get().await?;

        let video = self
            .exporter
            .export(parsed.as_ref(), &maps, &audio, bgm.as_ref())
            .await?;
        self.session.video.set(&video).await?;
        Ok(video)
    }

    /// Forget the stored video reference.
    pub async fn clear_video(&self) -> AnigenResult<()> {
        self.session.video.delete().await
    }

    // ---- Session ----

    /// Clear every slot and return to script entry.
    pub async fn reset(&self) -> AnigenResult<()> {
        self.ledger.clear().await?;
        self.session.reset().await
    }

    /// Probe the three services.
    pub async fn health(&self) -> Vec<(&'static str, AnigenResult<HealthReport>)> {
        self.services.health().await
    }

    // ---- Helpers ----

    async fn side_maps(&self) -> AnigenResult<(CharacterImageMap, BackgroundImageMap, VoiceMap)> {
        Ok((
            self.session.character_images.get().await?.unwrap_or_default(),
            self.session.background_images.get().await?.unwrap_or_default(),
            self.session.voices.get().await?.unwrap_or_default(),
        ))
    }

    async fn reconcile_stored(&self) -> AnigenResult<()> {
        let Some(parsed) = self.session.parsed.get().await? else {
            return Ok(());
        };
        let (character_images, background_images, voices) = self.side_maps().await?;
        let maps = SideMaps {
            character_images: &character_images,
            background_images: &background_images,
            voices: &voices,
        };
        if let Cow::Owned(merged) = reconcile(&parsed, &maps) {
            self.session.parsed.set(&merged).await?;
        }
        Ok(())
    }

    async fn load_storyboard(&self) -> AnigenResult<Storyboard> {
        match self.session.parsed.get().await? {
            Some(ParsedScript::Scenes(storyboard)) if !storyboard.scenes.is_empty() => {
                Ok(storyboard)
            }
            _ => Err(ExportError::new(ExportErrorKind::NoParsedScript).into()),
        }
    }

    async fn require_character(&self, character: &str) -> AnigenResult<()> {
        let storyboard = self.load_storyboard().await?;
        if storyboard.lines().any(|(_, line)| line.character == character) {
            Ok(())
        } else {
            Err(WizardError::new(WizardErrorKind::UnknownCharacter(character.to_string())).into())
        }
    }

    async fn require_scene(&self, scene_key: &str) -> AnigenResult<()> {
        let storyboard = self.load_storyboard().await?;
        let known = storyboard
            .scenes
            .iter()
            .enumerate()
            .any(|(idx, scene)| Storyboard::scene_key(idx, scene) == scene_key);
        if known {
            Ok(())
        } else {
            Err(WizardError::new(WizardErrorKind::UnknownScene(scene_key.to_string())).into())
        }
    }
}

/// Reuse ids of lines that kept their position, speaker and text.
fn carry_line_ids(fresh: &mut Storyboard, previous: &Storyboard) {
    let previous: HashMap<LinePosition, (&str, &str, &String)> = previous
        .lines()
        .filter_map(|(position, line)| {
            line.line_id
                .as_ref()
                .map(|id| (position, (line.character.as_str(), line.line.as_str(), id)))
        })
        .collect();

    for (scene_idx, scene) in fresh.scenes.iter_mut().enumerate() {
        for (sub_idx, sub) in scene.sub_scenes.iter_mut().enumerate() {
            for (line_idx, line) in sub.storyboards.iter_mut().enumerate() {
                let position = LinePosition {
                    scene: scene_idx,
                    sub_scene: sub_idx,
                    line: line_idx,
                };
                if line.line_id.is_none()
                    && let Some((character, text, id)) = previous.get(&position)
                    && *character == line.character
                    && *text == line.line
                {
                    line.line_id = Some((*id).clone());
                }
            }
        }
    }
}
