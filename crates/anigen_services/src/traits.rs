//! Service seams.

use crate::{HealthReport, RenderRequest, SpeechRequest};
use anigen_core::{AudioClip, ParsedScript, VideoReference};
use anigen_error::AnigenResult;
use async_trait::async_trait;

/// Turns raw script text into a storyboard.
#[async_trait]
pub trait ScriptParser: Send + Sync {
    /// Parse `text`.
    ///
    /// A parser that understood the request but could not parse the script
    /// answers with [`ParsedScript::Failed`], which is not an error here.
    async fn parse(&self, text: &str) -> AnigenResult<ParsedScript>;

    /// Probe the service.
    async fn health(&self) -> AnigenResult<HealthReport>;
}

/// Synthesizes one line of speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `request`, returning the audio and its MIME type.
    async fn synthesize(&self, request: &SpeechRequest) -> AnigenResult<AudioClip>;

    /// Probe the service.
    async fn health(&self) -> AnigenResult<HealthReport>;
}

/// Composites the final video.
#[async_trait]
pub trait VideoRenderer: Send + Sync {
    /// Render `request` and return where the video can be fetched.
    async fn render(&self, request: &RenderRequest) -> AnigenResult<VideoReference>;

    /// Probe the service.
    async fn health(&self) -> AnigenResult<HealthReport>;
}
