//! Shared HTTP plumbing for the service clients.

use crate::HealthReport;
use crate::models::ErrorBody;
use anigen_error::{AnigenResult, ServiceError, ServiceErrorKind};
use tracing::instrument;

/// One remote service: a name for messages, a base URL and a client.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    service: &'static str,
    base_url: String,
    client: reqwest::Client,
}

impl Endpoint {
    pub(crate) fn new(service: &'static str, base_url: impl Into<String>) -> Self {
        Self::with_client(service, base_url, reqwest::Client::new())
    }

    pub(crate) fn with_client(
        service: &'static str,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            service,
            base_url,
            client,
        }
    }

    pub(crate) fn service(&self) -> &'static str {
        self.service
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Transport failure naming the URL that could not be reached.
    pub(crate) fn network_error(&self, url: &str, e: reqwest::Error) -> ServiceError {
        tracing::error!(service = self.service, url, error = %e, "Request failed");
        ServiceError::new(ServiceErrorKind::Network {
            service: self.service.to_string(),
            message: format!("{}: {}", url, e),
        })
    }

    pub(crate) fn decode_error(&self, e: impl std::fmt::Display) -> ServiceError {
        tracing::error!(service = self.service, error = %e, "Failed to decode response");
        ServiceError::new(ServiceErrorKind::Deserialization {
            service: self.service.to_string(),
            message: e.to_string(),
        })
    }

    /// Status failure carrying the body's `error` message when it has one.
    pub(crate) async fn status_error(&self, response: reqwest::Response) -> ServiceError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "Unknown error".to_string());
        tracing::error!(service = self.service, %status, message, "Service returned error");
        ServiceError::new(ServiceErrorKind::Status {
            service: self.service.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    #[instrument(skip(self), fields(service = self.service, base_url = %self.base_url))]
    pub(crate) async fn health(&self) -> AnigenResult<HealthReport> {
        let url = self.url("/health");
        tracing::debug!("Checking service health");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.network_error(&url, e))?;

        if !response.status().is_success() {
            return Err(self.status_error(response).await.into());
        }

        let report = response
            .json::<HealthReport>()
            .await
            .map_err(|e| self.decode_error(e))?;
        tracing::debug!(status = %report.status, "Service answered health check");
        Ok(report)
    }
}
