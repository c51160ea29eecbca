// SPDX-License-Identifier: MPL-2.0
//! Talking to the pixelation service.
//!
//! [`ImageProcessor`] is the port the rest of the crate depends on;
//! [`HttpProcessor`] is the `reqwest` implementation. [`submit_with_timeout`]
//! wraps any processor in the submission timeout.

use super::form::UploadForm;
use super::race::with_timeout;
use crate::config::{EndpointConfig, HEALTH_PROBE_TIMEOUT_MS};
use crate::error::{Error, Result, SubmissionError};
use reqwest::Url;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Something that turns an uploaded image into a processed one.
pub trait ImageProcessor: Send + Sync + 'static {
    /// Sends `form` and resolves to the body of a successful response.
    fn process(
        &self,
        form: UploadForm,
    ) -> impl Future<Output = std::result::Result<Vec<u8>, SubmissionError>> + Send;
}

/// Runs one submission raced against `limit`.
///
/// Whatever the processor does after the timer fires is discarded.
pub async fn submit_with_timeout<P: ImageProcessor>(
    processor: Arc<P>,
    form: UploadForm,
    limit: Duration,
) -> std::result::Result<Vec<u8>, SubmissionError> {
    let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
    match with_timeout(limit, processor.process(form)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            log::warn!("submission timed out after {timeout_ms} ms");
            Err(SubmissionError::Timeout(timeout_ms))
        }
    }
}

/// Error body returned by the gateway on failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
    #[serde(default, rename = "detalle")]
    pub detail: Option<String>,
}

impl ServiceErrorBody {
    /// Parses a JSON error body, if the service sent one.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

/// Reachability of the service as reported by the health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl ServiceStatus {
    pub fn i18n_key(self) -> &'static str {
        match self {
            ServiceStatus::Checking => "service-status-checking",
            ServiceStatus::Online => "service-status-online",
            ServiceStatus::Offline => "service-status-offline",
        }
    }
}

/// `reqwest`-backed processor posting to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpProcessor {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpProcessor {
    /// Builds a processor for the configured endpoint.
    ///
    /// No request timeout is set on the client: the submission race owns the
    /// deadline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparsable URL and [`Error::Http`] if
    /// the client cannot be built.
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let url = Url::parse(&endpoint.url)
            .map_err(|err| Error::Config(format!("invalid endpoint url {}: {err}", endpoint.url)))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("IcedPixelate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: url,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Root of the service, where the gateway answers its health check.
    pub fn health_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// Probes the service root. Any failure reads as offline.
    pub async fn check_health(&self) -> ServiceStatus {
        let url = self.health_url();
        let request = self.client.get(url.clone()).send();
        match with_timeout(Duration::from_millis(HEALTH_PROBE_TIMEOUT_MS), request).await {
            Ok(Ok(response)) if response.status().is_success() => {
                log::info!("service at {url} is online");
                ServiceStatus::Online
            }
            Ok(Ok(response)) => {
                log::warn!("health probe {url} returned {}", response.status());
                ServiceStatus::Offline
            }
            Ok(Err(err)) => {
                log::warn!("health probe {url} failed: {err}");
                ServiceStatus::Offline
            }
            Err(_) => {
                log::warn!("health probe {url} timed out");
                ServiceStatus::Offline
            }
        }
    }
}

impl ImageProcessor for HttpProcessor {
    fn process(
        &self,
        form: UploadForm,
    ) -> impl Future<Output = std::result::Result<Vec<u8>, SubmissionError>> + Send {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        async move {
            let multipart = form.into_multipart()?;
            let response = client
                .post(endpoint.clone())
                .multipart(multipart)
                .send()
                .await
                .map_err(|err| {
                    log::warn!("POST {endpoint} failed: {err}");
                    SubmissionError::Transport(err.to_string())
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.bytes().await.unwrap_or_default();
                match ServiceErrorBody::parse(&body) {
                    Some(ServiceErrorBody { error, detail }) => log::warn!(
                        "POST {endpoint} returned {status}: {error}{}",
                        detail.map(|d| format!(" ({d})")).unwrap_or_default()
                    ),
                    None => log::warn!("POST {endpoint} returned {status}"),
                }
                return Err(SubmissionError::Status(status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|err| SubmissionError::Transport(err.to_string()))?;
            log::info!("POST {endpoint} returned {} bytes", body.len());
            Ok(body.to_vec())
        }
    }
}
