//! Video renderer client.

use crate::endpoint::Endpoint;
use crate::{HealthReport, RenderRequest, RenderResponse, VideoRenderer};
use anigen_core::VideoReference;
use anigen_error::{AnigenResult, ServiceError, ServiceErrorKind};
use async_trait::async_trait;
use tracing::instrument;

/// Client for `POST /render`.
///
/// Renders are slow and never retried.
#[derive(Debug, Clone)]
pub struct RendererClient {
    endpoint: Endpoint,
}

impl RendererClient {
    /// Create a client for the renderer at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new("renderer", base_url),
        }
    }

    /// Create a client sharing an existing `reqwest` connection pool.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: Endpoint::with_client("renderer", base_url, client),
        }
    }

    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }
}

#[async_trait]
impl VideoRenderer for RendererClient {
    #[instrument(
        skip(self, request),
        fields(
            service = self.endpoint.service(),
            scenes = request.scenes.len(),
            audio_files = request.audio_files.len(),
            has_bgm = request.bgm.is_some()
        )
    )]
    async fn render(&self, request: &RenderRequest) -> AnigenResult<VideoReference> {
        let url = self.endpoint.url("/render");
        tracing::info!(url, "Sending render request");

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

        let body = response
            .json::<RenderResponse>()
            .await
            .map_err(|e| self.endpoint.decode_error(e))?;

        match body.video_file {
            Some(video_file) => {
                tracing::info!(video_file, "Video rendered");
                Ok(VideoReference::from(video_file))
            }
            None => {
                let message = body
                    .error
                    .unwrap_or_else(|| "Failed to generate video".to_string());
                tracing::error!(message, "Renderer rejected request");
                Err(ServiceError::new(ServiceErrorKind::Rejected(message)).into())
            }
        }
    }

    async fn health(&self) -> AnigenResult<HealthReport> {
        self.endpoint.health().await
    }
}
