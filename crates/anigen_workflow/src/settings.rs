//! Service handles and tunables the wizard runs with.

use crate::speech::{DEFAULT_BATCH_PAUSE, DEFAULT_BATCH_SIZE};
use crate::upload::UploadPolicy;
use anigen_config::{AnigenConfig, ServicesConfig};
use anigen_error::AnigenResult;
use anigen_services::{
    HealthReport, ParserClient, RendererClient, ScriptParser, SpeechClient, SpeechSynthesizer,
    VideoRenderer,
};
use std::sync::Arc;
use std::time::Duration;

/// Default wait for a clip to be written out.
pub const DEFAULT_CLIP_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// The three remote services.
#[derive(Clone)]
pub struct Services {
    /// Script parser
    pub parser: Arc<dyn ScriptParser>,
    /// Speech synthesizer
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Video renderer
    pub renderer: Arc<dyn VideoRenderer>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

impl Services {
    /// HTTP clients for the configured endpoints.
    pub fn from_config(config: &ServicesConfig) -> Self {
        Self {
            parser: Arc::new(ParserClient::new(config.parser_url())),
            speech: Arc::new(SpeechClient::new(config.speech_url())),
            renderer: Arc::new(RendererClient::new(config.renderer_url())),
        }
    }

    /// Probe every service, in parser, speech, renderer order.
    pub async fn health(&self) -> Vec<(&'static str, AnigenResult<HealthReport>)> {
        let (parser, speech, renderer) = tokio::join!(
            self.parser.health(),
            self.speech.health(),
            self.renderer.health()
        );
        vec![("parser", parser), ("speech", speech), ("renderer", renderer)]
    }
}

/// Pacing and limits for a wizard session.
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), default)]
pub struct WizardSettings {
    /// Concurrent speech requests per group
    batch_size: usize,
    /// Pause between speech groups
    batch_pause: Duration,
    /// Wait for a clip to be written out
    clip_ready_timeout: Duration,
    /// Upload size limits
    upload_policy: UploadPolicy,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: DEFAULT_BATCH_PAUSE,
            clip_ready_timeout: DEFAULT_CLIP_READY_TIMEOUT,
            upload_policy: UploadPolicy::default(),
        }
    }
}

impl WizardSettings {
    /// Start a builder seeded with the defaults.
    pub fn builder() -> WizardSettingsBuilder {
        WizardSettingsBuilder::default()
    }

    /// Settings from the loaded configuration.
    pub fn from_config(config: &AnigenConfig) -> Self {
        Self {
            batch_size: *config.speech().batch_size(),
            batch_pause: config.speech().batch_pause(),
            clip_ready_timeout: config.speech().clip_ready_timeout(),
            upload_policy: UploadPolicy::from(config.uploads()),
        }
    }
}
