//! Speech synthesis client.

use crate::endpoint::Endpoint;
use crate::{HealthReport, SpeechRequest, SpeechSynthesizer};
use anigen_core::AudioClip;
use anigen_error::{AnigenResult, ServiceError, ServiceErrorKind};
use async_trait::async_trait;
use tracing::instrument;

/// Client for `POST /generate_tts`.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    endpoint: Endpoint,
}

impl SpeechClient {
    /// Create a client for the speech service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new("speech", base_url),
        }
    }

    /// Create a client sharing an existing `reqwest` connection pool.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: Endpoint::with_client("speech", base_url, client),
        }
    }

    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }
}

#[async_trait]
impl SpeechSynthesizer for SpeechClient {
    #[instrument(skip(self, request), fields(service = self.endpoint.service(), voice = %request.voice))]
    async fn synthesize(&self, request: &SpeechRequest) -> AnigenResult<AudioClip> {
        let url = self.endpoint.url("/generate_tts");
        tracing::debug!(text = %request.text, "Requesting speech");

        let response = self
            .endpoint
            .client()
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.endpoint.network_error(&url, e))?;

        if !response.status().is_success() {
            return Err(self.endpoint.status_error(response).await.into());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("audio") {
            tracing::error!(content_type, "Speech service returned non-audio response");
            return Err(ServiceError::new(ServiceErrorKind::NotAudio(if content_type.is_empty() {
                "none".to_string()
            } else {
                content_type
            }))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.endpoint.network_error(&url, e))?;
        if bytes.is_empty() {
            tracing::error!("Speech service returned empty audio");
            return Err(ServiceError::new(ServiceErrorKind::EmptyAudio).into());
        }

        let mime_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        tracing::debug!(size = bytes.len(), mime_type, "Received audio");
        Ok(AudioClip::new(mime_type, bytes.to_vec()))
    }

    async fn health(&self) -> AnigenResult<HealthReport> {
        self.endpoint.health().await
    }
}
