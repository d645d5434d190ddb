//! Release store transport port.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::fmt;

use crate::error::TransportError;

/// Body chunks as they arrive from the network.
pub type ChunkStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// An open response from the release store.
///
/// Dropping the body tears down the underlying connection.
pub struct ArtifactBody {
    /// Total size if the server advertised one.
    pub content_length: Option<u64>,
    /// Body chunks, in order.
    pub chunks: ChunkStream,
}

impl ArtifactBody {
    pub fn new(content_length: Option<u64>, chunks: ChunkStream) -> Self {
        Self {
            content_length,
            chunks,
        }
    }

    /// Build a body from in-memory chunks, advertising their total length.
    pub fn from_chunks(chunks: Vec<Bytes>) -> Self {
        let total = chunks.iter().map(|c| c.len() as u64).sum();
        Self::new(Some(total), stream::iter(chunks.into_iter().map(Ok)).boxed())
    }
}

impl fmt::Debug for ArtifactBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactBody")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Fetches release assets.
///
/// Implementations must report non-2xx responses as
/// [`TransportError::Status`] rather than returning their body.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ArtifactTransport: Send + Sync {
    /// Open a streaming GET request for `url`.
    async fn fetch(&self, url: &str) -> Result<ArtifactBody, TransportError>;
}
