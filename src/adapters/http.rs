//! HTTP probe for remote resources.
//!
//! Stands in for the media/document embed: a `HEAD` request either succeeds
//! (the resource would load) or fails with the reason the viewer would show.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use super::AssetProbe;
use crate::core::AssetLoadError;

/// Probes resources with bounded `HEAD` requests
pub struct HttpProbe {
    client: reqwest::Client,
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpProbe {
    /// Create a probe with a default HTTP client
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a probe around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetProbe for HttpProbe {
    fn name(&self) -> &str {
        "http"
    }

    async fn probe(&self, url: &str, limit: Duration) -> Result<(), AssetLoadError> {
        let request = self.client.head(url).send();

        let response = timeout(limit, request)
            .await
            .map_err(|_| AssetLoadError::TimedOut {
                url: url.to_string(),
                seconds: limit.as_secs(),
            })?
            .map_err(|e| AssetLoadError::Unavailable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetLoadError::Unavailable {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        tracing::debug!(url, %status, "Resource available");
        Ok(())
    }
}
