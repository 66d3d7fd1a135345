//! Transport for delivering claim requests.

use async_trait::async_trait;
use claim_core::error::{Result, TransportError};
use std::time::Duration;

/// Timeout for the single claim round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport for posting the claim form to a device endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST form-urlencoded fields to `url`, returning the raw response body.
    async fn post_form(&self, url: &str, fields: &[(&'static str, String)]) -> Result<Vec<u8>>;
}

/// HTTP transport over a pooled client with a fixed request timeout.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with an explicit timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, fields: &[(&'static str, String)]) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .await
            .map_err(map_send_error)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(body.to_vec())
    }
}

fn map_send_error(e: reqwest::Error) -> claim_core::error::Error {
    if e.is_timeout() {
        TransportError::Timeout.into()
    } else if e.is_connect() {
        TransportError::Connect(e.to_string()).into()
    } else {
        TransportError::Request(e.to_string()).into()
    }
}
