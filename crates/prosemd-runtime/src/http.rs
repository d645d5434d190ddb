//! reqwest-backed release store transport.

use async_trait::async_trait;
use futures_util::StreamExt;
use prosemd_core::{AcquireConfig, ArtifactBody, ArtifactTransport, TransportError};
use reqwest::Client;
use tracing::debug;

/// Production transport using reqwest.
///
/// Redirects are followed, since release assets are usually served from a
/// storage host behind a redirect. No overall request timeout is set. The
/// downloader bounds the wait for headers and for each chunk with its stall
/// timeout, so a slow but progressing download still completes.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the configured user agent and connect timeout.
    pub fn new(config: &AcquireConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtifactTransport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<ArtifactBody, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Connection(format!("HTTP request failed for {url}: {e}")))?;

        let status = response.status();
        debug!("Received HTTP status: {} for {}", status, url);
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_length = response.content_length();
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| TransportError::Body(e.to_string())))
            .boxed();

        Ok(ArtifactBody::new(content_length, chunks))
    }
}
