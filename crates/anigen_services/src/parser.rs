//! Script parser client.

use crate::endpoint::Endpoint;
use crate::{HealthReport, ParseRequest, ScriptParser};
use anigen_core::ParsedScript;
use anigen_error::AnigenResult;
use async_trait::async_trait;
use tracing::instrument;

/// Client for `POST /parse`.
#[derive(Debug, Clone)]
pub struct ParserClient {
    endpoint: Endpoint,
}

impl ParserClient {
    /// Create a client for the parser at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new("parser", base_url),
        }
    }

    /// Create a client sharing an existing `reqwest` connection pool.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: Endpoint::with_client("parser", base_url, client),
        }
    }

    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }
}

#[async_trait]
impl ScriptParser for ParserClient {
    #[instrument(skip(self, text), fields(service = self.endpoint.service(), text_len = text.len()))]
    async fn parse(&self, text: &str) -> AnigenResult<ParsedScript> {
        let url = self.endpoint.url("/parse");
        tracing::debug!(url, "Sending script to parser");

        let response = self
            .endpoint
            .client()
            .post(&url)
            .json(&ParseRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.endpoint.network_error(&url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.endpoint.network_error(&url, e))?;

        // The parser reports failures as `{ "error": ... }`, sometimes with a
        // non-success status; either way that body is the result to store.
        match serde_json::from_slice::<ParsedScript>(&body) {
            Ok(parsed) => {
                match parsed.error() {
                    Some(error) => tracing::warn!(%status, error, "Parser reported an error"),
                    None => tracing::info!(
                        scenes = parsed.storyboard().map_or(0, |s| s.scenes.len()),
                        "Parsed script"
                    ),
                }
                Ok(parsed)
            }
            Err(e) if status.is_success() => Err(self.endpoint.decode_error(e).into()),
            Err(_) => Err(anigen_error::ServiceError::new(
                anigen_error::ServiceErrorKind::Status {
                    service: self.endpoint.service().to_string(),
                    status: status.as_u16(),
                    message: "Unknown error".to_string(),
                },
            )
            .into()),
        }
    }

    async fn health(&self) -> AnigenResult<HealthReport> {
        self.endpoint.health().await
    }
}
