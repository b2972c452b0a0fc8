use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Raw HTTP response as seen by the envelope decoder
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport trait for issuing one GET request
///
/// Implementations must be safe to share across concurrent requests and must
/// not retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a GET for exactly `url` with the given headers
    ///
    /// # Returns
    /// The response body, or `ExchangeError::TransportError` for connection
    /// failures, timeouts and unreadable bodies
    async fn execute(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<RawResponse, ExchangeError>;
}

/// `Transport` backed by a pooled reqwest client
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, url, headers), fields(timeout_ms = self.timeout.as_millis() as u64))]
    async fn execute(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<RawResponse, ExchangeError> {
        let mut request = self.client.get(url);
        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }

        // The response is owned here; reading the body consumes it and any
        // early return drops it, releasing the connection either way.
        let response = request.send().await?;
        let status = response.status();
        debug!(status = %status, "response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                ExchangeError::TransportError(format!("Failed to read response body: {}", e))
            })?
            .to_vec();
        trace!(len = body.len(), "response body read");

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
