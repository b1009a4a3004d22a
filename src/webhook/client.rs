//! HTTP client for the automation webhook.
//!
//! One `POST` per call, no retries and no caching. Transport failures of any
//! kind (DNS, refused connection, timeout, broken body) surface as
//! [`UpstreamError`]; every completed exchange becomes a [`Reply`].

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use thiserror::Error;
use tracing::{info_span, Instrument};

use crate::board::ActionRequest;
use crate::config::{TimeoutConfig, WebhookConfig};
use crate::observability::metrics;
use crate::webhook::reply::Reply;

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Errors that can occur while talking to the webhook.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP client could not be constructed.
    #[error("failed to build webhook client: {0}")]
    Build(#[source] reqwest::Error),

    /// Shared secret is not a valid header value.
    #[error("webhook secret contains characters not allowed in a header")]
    InvalidSecret,

    /// Upstream did not answer in time.
    #[error("webhook timed out after {0} seconds")]
    Timeout(u64),

    /// Connection could not be established.
    #[error("webhook connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    /// Any other transport failure, including a broken response body.
    #[error("webhook request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Transport settings for [`WebhookClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub system_proxy: bool,
}

impl ClientSettings {
    pub fn from_config(webhook: &WebhookConfig, timeouts: &TimeoutConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(timeouts.connect_secs),
            timeout: Duration::from_secs(timeouts.upstream_secs),
            system_proxy: webhook.system_proxy,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from_config(&WebhookConfig::default(), &TimeoutConfig::default())
    }
}

/// Client bound to a single webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
    secret: Option<HeaderValue>,
    timeout: Duration,
}

impl WebhookClient {
    pub fn new(
        url: impl Into<String>,
        secret: Option<&str>,
        settings: &ClientSettings,
    ) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout);
        if !settings.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(UpstreamError::Build)?;

        let secret = match secret {
            Some(raw) => {
                let mut value =
                    HeaderValue::from_str(raw).map_err(|_| UpstreamError::InvalidSecret)?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            client,
            url: url.into(),
            secret,
            timeout: settings.timeout,
        })
    }

    /// Build a client from configuration; `None` when no webhook URL is set.
    pub fn from_config(
        webhook: &WebhookConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Option<Self>, UpstreamError> {
        let Some(url) = webhook.url.as_deref() else {
            return Ok(None);
        };
        let settings = ClientSettings::from_config(webhook, timeouts);
        Self::new(url, webhook.secret.as_deref(), &settings).map(Some)
    }

    /// Forward a validated action and translate the webhook's answer.
    pub async fn forward(
        &self,
        request: &ActionRequest,
        request_id: Option<&str>,
    ) -> Result<Reply, UpstreamError> {
        let span = info_span!(
            "webhook_forward",
            action = %request.action,
            request_id = request_id.unwrap_or("unknown"),
        );

        async move {
            let start = Instant::now();
            let result = self.send(request, request_id).await;
            metrics::record_upstream(if result.is_ok() { "ok" } else { "error" }, start);

            match &result {
                Ok(reply) => tracing::debug!(
                    status = %reply.status,
                    json = reply.is_json(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Webhook answered"
                ),
                Err(e) => tracing::error!(
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Webhook unreachable"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn send(
        &self,
        request: &ActionRequest,
        request_id: Option<&str>,
    ) -> Result<Reply, UpstreamError> {
        let mut http_request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .json(request);

        if let Some(secret) = &self.secret {
            http_request = http_request.header(SECRET_HEADER, secret.clone());
        }
        if let Some(id) = request_id {
            http_request = http_request.header("x-request-id", id);
        }

        let response = http_request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        Ok(Reply::from_upstream(status, text))
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout.as_secs())
        } else if error.is_connect() {
            UpstreamError::Connect(error)
        } else {
            UpstreamError::Transport(error)
        }
    }
}
