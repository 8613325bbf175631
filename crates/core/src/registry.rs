//! Ayushman Bharat registry sync.
//!
//! The registry is called with a bounded timeout and whatever JSON it returns is forwarded
//! untouched. Failures are classified into [`SyncError`] so they can be logged precisely, then
//! collapsed into a fixed offline payload by [`RegistryClient::fetch_or_offline`]. Registry
//! failures never become server errors.

use crate::config::CoreConfig;
use crate::constants::OFFLINE_MESSAGE;
use crate::{CoreError, CoreResult};
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("registry did not answer within the timeout")]
    Timeout,
    #[error("registry request failed: {0}")]
    Transport(reqwest::Error),
    #[error("registry response was not JSON: {0}")]
    Decode(reqwest::Error),
}

impl SyncError {
    fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SyncError::Timeout
        } else {
            SyncError::Transport(e)
        }
    }

    fn from_body(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SyncError::Timeout
        } else if e.is_decode() {
            SyncError::Decode(e)
        } else {
            SyncError::Transport(e)
        }
    }
}

/// The body returned in place of registry data when the registry cannot be used.
pub fn offline_payload() -> Value {
    json!({ "error": OFFLINE_MESSAGE })
}

/// HTTP client for the registry endpoint.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    client: reqwest::Client,
    url: String,
}

impl RegistryClient {
    /// Builds a client for `url` whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns `CoreError::Registry` if the underlying HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CoreError::Registry)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        Self::new(cfg.registry_url(), cfg.registry_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the registry payload.
    ///
    /// The HTTP status is not inspected: any response whose body parses as JSON is returned.
    pub async fn fetch(&self) -> Result<Value, SyncError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(SyncError::from_send)?;

        response.json::<Value>().await.map_err(SyncError::from_body)
    }

    /// Fetches the registry payload, falling back to [`offline_payload`] on any failure.
    pub async fn fetch_or_offline(&self) -> Value {
        match self.fetch().await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("registry sync failed, serving offline payload: {}", e);
                offline_payload()
            }
        }
    }
}
